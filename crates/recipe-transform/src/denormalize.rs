//! The run-level denormalization pass.

use std::time::Instant;

use tracing::{debug, info, warn};

use recipe_ingest::{Collection, Document, DocumentSource};
use recipe_model::RowSets;

use crate::error::{Result, TransformError};
use crate::flatten::{flatten_recipe, interaction_row, user_row};

/// Check the source connection, then flatten every collection into the five row sets.
///
/// Rows keep source order. Duplicate ids pass through unchanged and nothing
/// is validated here.
///
/// # Errors
///
/// Fails when the source cannot be reached or a collection stream breaks.
pub fn denormalize(source: &dyn DocumentSource) -> Result<RowSets> {
    let started = Instant::now();
    match source.check_connection().map_err(TransformError::Connection)? {
        Some(_) => debug!("document source reachable"),
        None => warn!("document source reachable but users collection is empty"),
    }

    let mut rows = RowSets::default();

    for_each_document(source, Collection::Users, |document| {
        rows.users.push(user_row(document));
    })?;

    for_each_document(source, Collection::Recipes, |document| {
        let flattened = flatten_recipe(document);
        rows.recipes.push(flattened.recipe);
        rows.ingredients.extend(flattened.ingredients);
        rows.steps.extend(flattened.steps);
    })?;

    for_each_document(source, Collection::Interactions, |document| {
        rows.interactions.push(interaction_row(document));
    })?;

    info!(
        users = rows.users.len(),
        recipes = rows.recipes.len(),
        ingredients = rows.ingredients.len(),
        steps = rows.steps.len(),
        interactions = rows.interactions.len(),
        duration_ms = started.elapsed().as_millis(),
        "denormalize complete"
    );
    Ok(rows)
}

fn for_each_document(
    source: &dyn DocumentSource,
    collection: Collection,
    mut visit: impl FnMut(&Document),
) -> Result<()> {
    let stream_error = |source| TransformError::Stream { collection, source };
    let mut count = 0usize;
    for document in source.stream(collection).map_err(stream_error)? {
        visit(&document.map_err(stream_error)?);
        count += 1;
    }
    debug!(collection = %collection, documents = count, "collection flattened");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_ingest::{IngestError, MemorySource};
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::from_value(value).0
    }

    #[test]
    fn test_denormalize_memory_source() {
        let source = MemorySource::new()
            .with_collection(
                Collection::Users,
                vec![doc(json!({"user_id": "u1", "username": "Ann", "email": "ann@example.com"}))],
            )
            .with_collection(
                Collection::Recipes,
                vec![
                    doc(json!({
                        "recipe_id": "rec_1",
                        "ingredients": [{"name": "Salt", "quantity": 1}],
                        "steps": ["Mix", "Bake"],
                    })),
                    doc(json!({"recipe_id": "rec_1"})),
                ],
            )
            .with_collection(
                Collection::Interactions,
                vec![doc(json!({"interaction_id": "int_0000", "type": "view"}))],
            );

        let rows = denormalize(&source).unwrap();
        assert_eq!(rows.users.len(), 1);
        assert_eq!(rows.recipes.len(), 2, "duplicate ids pass through");
        assert_eq!(rows.ingredients.len(), 1);
        assert_eq!(rows.steps.len(), 2);
        assert_eq!(rows.interactions.len(), 1);
    }

    #[test]
    fn test_empty_source_is_not_an_error() {
        let rows = denormalize(&MemorySource::new()).unwrap();
        assert_eq!(rows, RowSets::default());
    }

    struct Unreachable;

    impl DocumentSource for Unreachable {
        fn stream(&self, _collection: Collection) -> recipe_ingest::Result<recipe_ingest::DocumentStream<'_>> {
            Err(IngestError::SourceUnavailable {
                path: "/nowhere".into(),
            })
        }
    }

    #[test]
    fn test_unreachable_source_is_fatal() {
        let err = denormalize(&Unreachable).unwrap_err();
        assert!(matches!(err, TransformError::Connection(_)));
    }
}
