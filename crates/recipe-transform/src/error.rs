//! Error types for the denormalizer.

use thiserror::Error;

use recipe_ingest::{Collection, IngestError};

/// Fatal, run-level denormalization failures.
///
/// Per-document field problems never surface here; they degrade to empty
/// cells instead.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The connectivity check could not reach the source.
    #[error("document source connection check failed: {0}")]
    Connection(#[source] IngestError),

    /// Streaming a collection failed part way.
    #[error("failed to stream {collection}: {source}")]
    Stream {
        collection: Collection,
        #[source]
        source: IngestError,
    },
}

/// Result type for denormalization.
pub type Result<T> = std::result::Result<T, TransformError>;
