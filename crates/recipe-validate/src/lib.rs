//! Cross-table data quality validation.
//!
//! Reads the five materialized tables as string-cell records and classifies
//! each record as PASS or FAIL with the reasons found:
//!
//! - **Presence**: required fields must be non-empty
//! - **Format**: numeric positivity, email shape
//! - **Closed sets**: `difficulty` and interaction `type`
//! - **References**: foreign keys checked against a [`ReferenceIndex`] built
//!   once up front
//!
//! A missing or empty table aborts the run instead of producing a partial
//! report.

pub mod checks;
mod error;
mod index;
mod issue;
mod report;
mod validator;

pub use checks::{check_record, required_fields};
pub use error::{Result, ValidateError};
pub use index::ReferenceIndex;
pub use issue::{Issue, Status};
pub use report::{
    MISSING_RECORD_ID, TableSummary, VALIDATED_AT_FORMAT, ValidationReport, Verdict, record_id,
};
pub use validator::{validate, validate_now};
