//! Error types for report encoding.

use std::path::PathBuf;
use thiserror::Error;

use recipe_model::TableKind;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to encode a table as delimited text.
    #[error("failed to encode {table} table: {source}")]
    EncodeTable {
        table: TableKind,
        #[source]
        source: csv::Error,
    },

    /// Failed to encode the validation report.
    #[error("failed to encode validation report: {0}")]
    EncodeReport(#[source] csv::Error),

    /// Failed to serialize or parse the manifest.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
