//! Report and export encoding.
//!
//! - **Tables**: the five row sets as delimited text with a header row
//! - **Validation report**: `Table, Record_ID, Status, Issues, Validated_At`
//! - **Fingerprints**: SHA-256 per encoded table, collected in a manifest

mod error;
mod fingerprint;
mod tables;
mod validation;

pub use error::{ReportError, Result};
pub use fingerprint::{MANIFEST_FILE_NAME, Manifest, ManifestEntry, sha256_hex};
pub use tables::{EncodedTable, encode_row_sets, encode_table};
pub use validation::{
    ISSUE_SEPARATOR, NO_ISSUES, REPORT_HEADER, encode_validation_report, issues_cell,
    write_validation_report,
};
