//! Error types for storage and warehouse operations.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    // === Object Storage ===
    /// Bucket name was not configured.
    #[error("BUCKET_NAME env var missing")]
    BucketNameMissing,

    /// Object key escapes the bucket or is empty.
    #[error("invalid object key: {key:?}")]
    InvalidKey { key: String },

    /// Object does not exist in the bucket.
    #[error("object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    /// Failed to read or write the bucket.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Warehouse ===
    /// Parsing or writing a table failed.
    #[error("load job for {table_id} failed: {source}")]
    Load {
        table_id: String,
        #[source]
        source: PolarsError,
    },

    /// Failed to write warehouse files.
    #[error("warehouse error at {path}: {source}")]
    Warehouse {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a table schema.
    #[error("failed to serialize schema for {table_id}: {source}")]
    Schema {
        table_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding an upload payload failed.
    #[error(transparent)]
    Report(#[from] recipe_report::ReportError),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
