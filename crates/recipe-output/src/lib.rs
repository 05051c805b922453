//! Object storage and warehouse collaborators.
//!
//! - **Object storage**: [`ObjectStore`] with a directory-backed [`LocalBucket`]
//! - **Upload**: exported tables under `backups/` plus a fingerprint manifest
//! - **Load planning**: which objects are eligible and which table each replaces
//! - **Warehouse**: [`LocalWarehouse`] infers column types and truncates on load

mod error;
mod load;
mod store;
mod upload;
mod warehouse;

pub use error::{OutputError, Result};
pub use load::{DatasetRef, LoadTarget, plan_loads};
pub use store::{CSV_CONTENT_TYPE, LocalBucket, ObjectStore};
pub use upload::{previous_manifest, upload_extract};
pub use warehouse::{
    ColumnSchema, LoadedTable, LocalWarehouse, SCHEMA_FILE_SUFFIX, Warehouse, load_all,
    warehouse_type,
};
