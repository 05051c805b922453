//! Fatal validation preconditions.

use thiserror::Error;

use recipe_model::TableKind;

/// Errors that abort a validation run before any verdict is produced.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// One of the five tables was not supplied.
    #[error("{table} table is missing; run the extract first")]
    MissingTable { table: TableKind },

    /// A table was supplied but holds no records.
    #[error("{table} table is empty")]
    EmptyTable { table: TableKind },
}

/// Result type for validation runs.
pub type Result<T> = std::result::Result<T, ValidateError>;
