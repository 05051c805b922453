//! Object storage.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{OutputError, Result};

/// Content type of exported tables.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A flat key space of byte objects.
pub trait ObjectStore {
    /// Name of the bucket, used in messages.
    fn bucket(&self) -> &str;

    /// Write `bytes` at `key`, replacing any existing object.
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;

    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Keys starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Bucket stored as a directory: `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalBucket {
    name: String,
    dir: PathBuf,
}

impl LocalBucket {
    /// Open (creating if needed) bucket `name` under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::BucketNameMissing`] for a blank name.
    pub fn open(root: &Path, name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OutputError::BucketNameMissing);
        }
        let dir = root.join(name);
        fs::create_dir_all(&dir).map_err(|source| OutputError::Storage {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(OutputError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(relative))
    }
}

impl ObjectStore for LocalBucket {
    fn bucket(&self) -> &str {
        &self.name
    }

    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        let path = self.object_path(key)?;
        let storage_error = |source| OutputError::Storage {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }
        fs::write(&path, bytes).map_err(storage_error)?;
        debug!(bucket = %self.name, key, content_type, bytes = bytes.len(), "object written");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(key)?;
        if !path.is_file() {
            return Err(OutputError::ObjectNotFound {
                bucket: self.name.clone(),
                key: key.to_string(),
            });
        }
        fs::read(&path).map_err(|source| OutputError::Storage { path, source })
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        collect_keys(&self.dir, &self.dir, &mut keys)?;
        keys.retain(|key| key.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}

fn collect_keys(root: &Path, dir: &Path, keys: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| OutputError::Storage {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| OutputError::Storage {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_keys(root, &path, keys)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            let key: Vec<String> = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect();
            keys.push(key.join("/"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_list() {
        let dir = tempfile::tempdir().unwrap();
        let bucket = LocalBucket::open(dir.path(), "recipes-bucket").unwrap();
        bucket.put("backups/users.csv", b"user_id\n", CSV_CONTENT_TYPE).unwrap();
        bucket.put("notes.txt", b"hi", "text/plain").unwrap();

        assert_eq!(bucket.get("backups/users.csv").unwrap(), b"user_id\n");
        assert_eq!(bucket.list("backups/").unwrap(), vec!["backups/users.csv"]);
        assert_eq!(bucket.list("").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_object() {
        let dir = tempfile::tempdir().unwrap();
        let bucket = LocalBucket::open(dir.path(), "b").unwrap();
        assert!(matches!(
            bucket.get("backups/steps.csv"),
            Err(OutputError::ObjectNotFound { .. })
        ));
    }

    #[test]
    fn test_rejects_escaping_keys_and_blank_names() {
        let dir = tempfile::tempdir().unwrap();
        let bucket = LocalBucket::open(dir.path(), "b").unwrap();
        assert!(matches!(
            bucket.put("../outside.csv", b"", CSV_CONTENT_TYPE),
            Err(OutputError::InvalidKey { .. })
        ));
        assert!(matches!(
            LocalBucket::open(dir.path(), "  "),
            Err(OutputError::BucketNameMissing)
        ));
    }
}
