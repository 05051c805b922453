//! Document source access and table loading.
//!
//! This crate covers both ends of the pipeline's input side:
//!
//! - **Document Source**: Stream the `users`, `recipes`, and `interactions`
//!   collections from a directory of JSON-lines files or from memory
//! - **Seeding**: Generate a reproducible demo source
//! - **Table Loading**: Read the five materialized tables back as
//!   string-cell records for validation
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use recipe_ingest::{Collection, DocumentSource, JsonLinesSource, load_raw_tables};
//! use recipe_model::TableLayout;
//!
//! let source = JsonLinesSource::open("data/source")?;
//! let first_user = source.check_connection()?;
//! let users = source.stream(Collection::Users)?.count();
//!
//! let tables = load_raw_tables(Path::new("warehouse/recipe_analytics"), TableLayout::Warehouse)?;
//! ```

mod document;
mod error;
pub mod seed;
mod source;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Documents ===
pub use document::{Collection, Document};

// === Sources ===
pub use source::{
    COLLECTION_FILE_EXTENSION, DocumentSource, DocumentStream, JsonLinesSource, MemorySource,
    collection_path, write_collection,
};

// === Seeding ===
pub use seed::{FEATURED_RECIPE_ID, FEATURED_USER_ID, SeedOptions, generate};

// === Table Loading ===
pub use table::{load_raw_tables, read_raw_table};
