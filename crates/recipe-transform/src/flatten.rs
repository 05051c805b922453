//! Pure conversions from source documents to typed rows.
//!
//! These functions never fail: a missing or mistyped field becomes an empty
//! cell, and a missing embedded list yields no child rows.

use serde_json::Value;

use recipe_ingest::Document;
use recipe_model::{IngredientRow, InteractionRow, RecipeRow, StepRow, UserRow};

use crate::value::{optional_cell, render, text_cell, timestamp_cell};

/// A recipe row together with the child rows expanded from its embedded lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedRecipe {
    pub recipe: RecipeRow,
    pub ingredients: Vec<IngredientRow>,
    pub steps: Vec<StepRow>,
}

pub fn user_row(document: &Document) -> UserRow {
    UserRow {
        user_id: text_cell(document, "user_id"),
        username: text_cell(document, "username"),
        email: text_cell(document, "email"),
        created_at: timestamp_cell(document, "created_at"),
    }
}

/// Flatten one recipe document.
///
/// Every embedded ingredient and step becomes one row keyed by the recipe's
/// `recipe_id`. Step numbers come from list position, starting at 1; any
/// `step_number` carried by the source is ignored.
pub fn flatten_recipe(document: &Document) -> FlattenedRecipe {
    let recipe = RecipeRow {
        recipe_id: text_cell(document, "recipe_id"),
        title: text_cell(document, "title"),
        author_id: text_cell(document, "author_id"),
        prep_time_minutes: text_cell(document, "prep_time_minutes"),
        difficulty: text_cell(document, "difficulty"),
        created_at: timestamp_cell(document, "created_at"),
    };

    let ingredients = embedded_list(document, "ingredients")
        .iter()
        .map(|ingredient| ingredient_row(&recipe.recipe_id, ingredient))
        .collect();

    let steps = embedded_list(document, "steps")
        .iter()
        .zip(1u32..)
        .map(|(instruction, step_number)| StepRow {
            recipe_id: recipe.recipe_id.clone(),
            step_number,
            instruction: render(instruction),
        })
        .collect();

    FlattenedRecipe {
        recipe,
        ingredients,
        steps,
    }
}

pub fn interaction_row(document: &Document) -> InteractionRow {
    InteractionRow {
        interaction_id: text_cell(document, "interaction_id"),
        user_id: text_cell(document, "user_id"),
        recipe_id: text_cell(document, "recipe_id"),
        interaction_type: text_cell(document, "type"),
        rating: optional_cell(document, "rating"),
        timestamp: timestamp_cell(document, "timestamp"),
    }
}

fn embedded_list<'a>(document: &'a Document, field: &str) -> &'a [Value] {
    document
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// An ingredient entry that is not a mapping keeps its parent key and
/// nothing else.
fn ingredient_row(recipe_id: &str, ingredient: &Value) -> IngredientRow {
    let field = |name: &str| {
        ingredient
            .get(name)
            .map(render)
            .unwrap_or_default()
    };
    IngredientRow {
        recipe_id: recipe_id.to_string(),
        name: field("name"),
        quantity: field("quantity"),
        unit: field("unit"),
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
    fn test_flatten_recipe_expands_children() {
        let flattened = flatten_recipe(&doc(json!({
            "recipe_id": "rec_1",
            "title": "Soup",
            "prep_time_minutes": 35,
            "difficulty": "Medium",
            "ingredients": [
                {"name": "Water", "quantity": 250, "unit": "ml"},
                {"name": "Salt", "quantity": 0.5},
            ],
            "steps": ["Boil", "Season", "Serve"],
        })));

        assert_eq!(flattened.recipe.recipe_id, "rec_1");
        assert_eq!(flattened.recipe.prep_time_minutes, "35");
        assert_eq!(flattened.recipe.author_id, "");
        assert_eq!(flattened.ingredients.len(), 2);
        assert_eq!(flattened.ingredients[1].quantity, "0.5");
        assert_eq!(flattened.ingredients[1].unit, "");
        assert!(flattened.ingredients.iter().all(|row| row.recipe_id == "rec_1"));

        let numbered: Vec<(u32, &str)> = flattened
            .steps
            .iter()
            .map(|step| (step.step_number, step.instruction.as_str()))
            .collect();
        assert_eq!(numbered, vec![(1, "Boil"), (2, "Season"), (3, "Serve")]);
    }

    #[test]
    fn test_recipe_without_lists_has_no_children() {
        let flattened = flatten_recipe(&doc(json!({"recipe_id": "rec_2", "steps": "Boil"})));
        assert!(flattened.ingredients.is_empty());
        assert!(flattened.steps.is_empty());
    }

    #[test]
    fn test_non_mapping_ingredient_degrades() {
        let flattened = flatten_recipe(&doc(json!({
            "recipe_id": "rec_3",
            "ingredients": ["Salt"],
        })));
        assert_eq!(
            flattened.ingredients,
            vec![IngredientRow {
                recipe_id: "rec_3".to_string(),
                ..IngredientRow::default()
            }]
        );
    }

    #[test]
    fn test_interaction_rating_is_optional() {
        let rated = interaction_row(&doc(json!({
            "interaction_id": "int_0001",
            "type": "cook_attempt",
            "rating": 5,
        })));
        assert_eq!(rated.interaction_type, "cook_attempt");
        assert_eq!(rated.rating.as_deref(), Some("5"));

        let unrated = interaction_row(&doc(json!({"interaction_id": "int_0002", "rating": null})));
        assert_eq!(unrated.rating, None);
    }

    #[test]
    fn test_user_row_keeps_bad_values() {
        let row = user_row(&doc(json!({"user_id": 17, "email": "not-an-email"})));
        assert_eq!(row.user_id, "17");
        assert_eq!(row.email, "not-an-email");
        assert_eq!(row.username, "");
    }
}
