//! Content fingerprints of exported tables.
//!
//! Two extracts over an unchanged source produce identical manifests, which
//! makes a re-run cheap to compare.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use recipe_model::{EXPORT_PREFIX, TableKind};

use crate::error::Result;
use crate::tables::EncodedTable;

/// File name of the manifest written next to the exported tables.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub table: TableKind,
    pub file: String,
    pub rows: usize,
    pub sha256: String,
}

/// Fingerprints of one extract, in export order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub tables: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn from_tables(tables: &[EncodedTable]) -> Self {
        Self {
            tables: tables
                .iter()
                .map(|table| ManifestEntry {
                    table: table.kind,
                    file: table.file_name().to_string(),
                    rows: table.rows,
                    sha256: table.sha256.clone(),
                })
                .collect(),
        }
    }

    pub fn object_key() -> String {
        format!("{EXPORT_PREFIX}{MANIFEST_FILE_NAME}")
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Tables whose fingerprint differs from `previous`, or that are new.
    pub fn changed_since(&self, previous: &Manifest) -> Vec<TableKind> {
        self.tables
            .iter()
            .filter(|entry| {
                !previous
                    .tables
                    .iter()
                    .any(|old| old.table == entry.table && old.sha256 == entry.sha256)
            })
            .map(|entry| entry.table)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::encode_row_sets;
    use recipe_model::{RowSets, UserRow};

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_manifest_detects_changes() {
        let before = Manifest::from_tables(&encode_row_sets(&RowSets::default()).unwrap());
        let rows = RowSets {
            users: vec![UserRow {
                user_id: "u1".to_string(),
                ..UserRow::default()
            }],
            ..RowSets::default()
        };
        let after = Manifest::from_tables(&encode_row_sets(&rows).unwrap());

        assert!(before.changed_since(&before).is_empty());
        assert_eq!(after.changed_since(&before), vec![TableKind::Users]);

        let parsed = Manifest::from_json_bytes(&after.to_json_bytes().unwrap()).unwrap();
        assert_eq!(parsed, after);
        assert_eq!(Manifest::object_key(), "backups/manifest.json");
    }
}
