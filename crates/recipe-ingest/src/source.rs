//! Document source handles.
//!
//! A source exposes the three named collections as lazy, finite,
//! non-restartable document streams. Handles are constructed at run start
//! and passed into the denormalizer explicitly.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::iter::Enumerate;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::document::{Collection, Document};
use crate::error::{IngestError, Result};

/// File extension of collection files in a JSON-lines source.
pub const COLLECTION_FILE_EXTENSION: &str = "jsonl";

/// Lazy stream of documents from one collection.
pub type DocumentStream<'a> = Box<dyn Iterator<Item = Result<Document>> + 'a>;

/// Upstream store holding the users, recipes, and interactions collections.
pub trait DocumentSource {
    /// Open a stream over every document in `collection`.
    fn stream(&self, collection: Collection) -> Result<DocumentStream<'_>>;

    /// Verify the source is reachable by reading at most one user document.
    ///
    /// Returns the first user document, or `None` when the collection is
    /// empty.
    fn check_connection(&self) -> Result<Option<Document>> {
        self.stream(Collection::Users)?.next().transpose()
    }
}

/// Directory of `<collection>.jsonl` files, one JSON document per line.
#[derive(Debug, Clone)]
pub struct JsonLinesSource {
    root: PathBuf,
}

impl JsonLinesSource {
    /// Open a source rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::SourceUnavailable`] when `root` is not a
    /// directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IngestError::SourceUnavailable { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        collection_path(&self.root, collection)
    }
}

impl DocumentSource for JsonLinesSource {
    fn stream(&self, collection: Collection) -> Result<DocumentStream<'_>> {
        if !self.root.is_dir() {
            return Err(IngestError::SourceUnavailable {
                path: self.root.clone(),
            });
        }
        let path = self.collection_path(collection);
        if !path.exists() {
            warn!(
                collection = %collection,
                path = %path.display(),
                "collection file not found; treating as empty"
            );
            return Ok(Box::new(std::iter::empty()));
        }
        let file = File::open(&path).map_err(|source| IngestError::CollectionRead {
            path: path.clone(),
            source,
        })?;
        debug!(collection = %collection, path = %path.display(), "streaming collection");
        Ok(Box::new(JsonLinesStream {
            collection,
            path,
            lines: BufReader::new(file).lines().enumerate(),
        }))
    }
}

struct JsonLinesStream {
    collection: Collection,
    path: PathBuf,
    lines: Enumerate<Lines<BufReader<File>>>,
}

impl Iterator for JsonLinesStream {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line) = self.lines.next()?;
            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(IngestError::CollectionRead {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };
            let text = line.trim_start_matches('\u{feff}').trim();
            if text.is_empty() {
                continue;
            }
            let value: Value = match serde_json::from_str(text) {
                Ok(value) => value,
                Err(error) => {
                    warn!(
                        collection = %self.collection,
                        path = %self.path.display(),
                        line = index + 1,
                        %error,
                        "document is not valid JSON; treating as empty"
                    );
                    return Some(Ok(Document::default()));
                }
            };
            let (document, is_object) = Document::from_value(value);
            if !is_object {
                warn!(
                    collection = %self.collection,
                    line = index + 1,
                    "document is not an object; treating as empty"
                );
            }
            return Some(Ok(document));
        }
    }
}

/// Path of a collection file inside a JSON-lines source root.
pub fn collection_path(root: &Path, collection: Collection) -> PathBuf {
    root.join(format!("{}.{COLLECTION_FILE_EXTENSION}", collection.name()))
}

/// Write `documents` as a JSON-lines collection file, replacing any existing one.
pub fn write_collection(
    root: &Path,
    collection: Collection,
    documents: &[Document],
) -> Result<PathBuf> {
    let path = collection_path(root, collection);
    let write_error = |source: io::Error| IngestError::CollectionWrite {
        path: path.clone(),
        source,
    };
    std::fs::create_dir_all(root).map_err(write_error)?;
    let file = File::create(&path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for document in documents {
        serde_json::to_writer(&mut writer, document.fields())
            .map_err(|err| write_error(io::Error::from(err)))?;
        writer.write_all(b"\n").map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;
    Ok(path)
}

/// In-memory source, used for seeding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: BTreeMap<Collection, Vec<Document>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_collection(mut self, collection: Collection, documents: Vec<Document>) -> Self {
        self.collections.insert(collection, documents);
        self
    }

    pub fn push(&mut self, collection: Collection, document: Document) {
        self.collections.entry(collection).or_default().push(document);
    }

    pub fn documents(&self, collection: Collection) -> &[Document] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Persist every collection as a JSON-lines source under `root`.
    pub fn write_to(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Collection::ALL
            .iter()
            .map(|collection| write_collection(root, *collection, self.documents(*collection)))
            .collect()
    }
}

impl DocumentSource for MemorySource {
    fn stream(&self, collection: Collection) -> Result<DocumentStream<'_>> {
        Ok(Box::new(
            self.documents(collection).iter().cloned().map(Ok),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).0
    }

    #[test]
    fn test_open_missing_root_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonLinesSource::open(dir.path().join("missing"));
        assert!(matches!(result, Err(IngestError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_write_then_stream_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let users = vec![
            doc(json!({"user_id": "u1", "username": "Ann"})),
            doc(json!({"user_id": "u2"})),
        ];
        write_collection(dir.path(), Collection::Users, &users).unwrap();

        let source = JsonLinesSource::open(dir.path()).unwrap();
        let streamed: Vec<Document> = source
            .stream(Collection::Users)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(streamed, users);
    }

    #[test]
    fn test_missing_collection_streams_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonLinesSource::open(dir.path()).unwrap();
        assert_eq!(source.stream(Collection::Recipes).unwrap().count(), 0);
        assert!(source.check_connection().unwrap().is_none());
    }

    #[test]
    fn test_unparseable_line_degrades_to_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            collection_path(dir.path(), Collection::Interactions),
            "{\"interaction_id\": \"int_0000\"}\n\n{not json\n{\"interaction_id\": \"int_0001\"}\n",
        )
        .unwrap();
        let source = JsonLinesSource::open(dir.path()).unwrap();
        let documents: Vec<Document> = source
            .stream(Collection::Interactions)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].get("interaction_id"), Some(&json!("int_0000")));
        assert!(documents[1].fields().is_empty());
        assert_eq!(documents[2].get("interaction_id"), Some(&json!("int_0001")));
    }

    #[test]
    fn test_non_object_line_degrades_to_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(collection_path(dir.path(), Collection::Users), "42\n").unwrap();
        let source = JsonLinesSource::open(dir.path()).unwrap();
        let first = source.check_connection().unwrap().unwrap();
        assert!(first.fields().is_empty());
    }

    #[test]
    fn test_memory_source_check_connection() {
        let source = MemorySource::new()
            .with_collection(Collection::Users, vec![doc(json!({"user_id": "u1"}))]);
        let first = source.check_connection().unwrap().unwrap();
        assert_eq!(first.get("user_id"), Some(&json!("u1")));
        assert_eq!(source.stream(Collection::Recipes).unwrap().count(), 0);
    }
}
