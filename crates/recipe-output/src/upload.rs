//! Uploading an extract to object storage.

use tracing::{info, warn};

use recipe_model::EXPORT_PREFIX;
use recipe_report::{EncodedTable, Manifest};

use crate::error::{OutputError, Result};
use crate::store::{CSV_CONTENT_TYPE, ObjectStore};

/// Content type of the fingerprint manifest.
const MANIFEST_CONTENT_TYPE: &str = "application/json";

/// Write every encoded table under the export prefix, then the manifest.
///
/// Returns the keys written, tables first.
pub fn upload_extract(store: &dyn ObjectStore, tables: &[EncodedTable]) -> Result<Vec<String>> {
    info!(bucket = store.bucket(), "uploading to {}/{EXPORT_PREFIX}", store.bucket());
    let mut keys = Vec::with_capacity(tables.len() + 1);
    for table in tables {
        let key = table.object_key();
        store.put(&key, &table.bytes, CSV_CONTENT_TYPE)?;
        info!(key = %key, rows = table.rows, sha256 = %table.sha256, "uploaded");
        keys.push(key);
    }

    let manifest = Manifest::from_tables(tables);
    let key = Manifest::object_key();
    store.put(&key, &manifest.to_json_bytes()?, MANIFEST_CONTENT_TYPE)?;
    keys.push(key);
    Ok(keys)
}

/// Manifest left by the previous extract, if any.
///
/// An unreadable or corrupt manifest is logged and treated as absent.
pub fn previous_manifest(store: &dyn ObjectStore) -> Option<Manifest> {
    let key = Manifest::object_key();
    let bytes = match store.get(&key) {
        Ok(bytes) => bytes,
        Err(OutputError::ObjectNotFound { .. }) => return None,
        Err(error) => {
            warn!(key = %key, %error, "previous manifest unreadable; comparing against none");
            return None;
        }
    };
    match Manifest::from_json_bytes(&bytes) {
        Ok(manifest) => Some(manifest),
        Err(error) => {
            warn!(key = %key, %error, "previous manifest is corrupt; comparing against none");
            None
        }
    }
}
