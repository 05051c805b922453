//! Recipe document denormalization.
//!
//! Flattens the `users`, `recipes`, and `interactions` collections into the
//! five fixed-schema row sets. Recipes expand into ingredient and step rows
//! keyed by `recipe_id`.
//!
//! # Design Principles
//!
//! - **Permissive**: a malformed document degrades per field and never aborts the run
//! - **Pure flattening**: [`flatten_recipe`] and friends do no I/O
//! - **Explicit handles**: the source is passed in, never looked up globally

mod denormalize;
mod error;
mod flatten;
mod value;

pub use denormalize::denormalize;
pub use error::{Result, TransformError};
pub use flatten::{FlattenedRecipe, flatten_recipe, interaction_row, user_row};
pub use value::{optional_cell, render, text_cell, timestamp_cell};
