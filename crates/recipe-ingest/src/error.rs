//! Error types for source access and table loading.

use std::path::PathBuf;
use thiserror::Error;

use recipe_model::TableKind;

/// Errors that can occur while reading the document source or a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source Errors ===
    /// Source root does not exist or is not a directory.
    #[error("document source unavailable: {path}")]
    SourceUnavailable { path: PathBuf },

    /// Failed to read a collection file.
    #[error("failed to read collection {path}: {source}")]
    CollectionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a collection file.
    #[error("failed to write collection {path}: {source}")]
    CollectionWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Table Errors ===
    /// Table file not found.
    #[error("{table} table not found: {path}")]
    TableNotFound { table: TableKind, path: PathBuf },

    /// Failed to parse a table file.
    #[error("failed to parse {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::TableNotFound {
            table: TableKind::Recipes,
            path: PathBuf::from("/data/recipe.csv"),
        };
        assert_eq!(err.to_string(), "recipes table not found: /data/recipe.csv");
    }
}
