//! Cross-table reference sets, built once before any record is checked.

use std::collections::BTreeSet;

use recipe_model::RawTable;

/// Known keys collected from the five tables.
///
/// Sets hold cell values verbatim, so an empty key collected from one table
/// matches an empty key looked up from another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    pub recipe_ids: BTreeSet<String>,
    pub user_ids: BTreeSet<String>,
    pub recipes_with_ingredients: BTreeSet<String>,
    pub recipes_with_steps: BTreeSet<String>,
}

impl ReferenceIndex {
    pub fn build(
        users: &RawTable,
        recipes: &RawTable,
        ingredients: &RawTable,
        steps: &RawTable,
    ) -> Self {
        Self {
            recipe_ids: key_set(recipes, "recipe_id"),
            user_ids: key_set(users, "user_id"),
            recipes_with_ingredients: key_set(ingredients, "recipe_id"),
            recipes_with_steps: key_set(steps, "recipe_id"),
        }
    }

    pub fn has_recipe(&self, recipe_id: &str) -> bool {
        self.recipe_ids.contains(recipe_id)
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.user_ids.contains(user_id)
    }
}

fn key_set(table: &RawTable, column: &str) -> BTreeSet<String> {
    table.column_values(column).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_model::{RawRecord, TableKind};

    fn table(kind: TableKind, column: &str, ids: &[&str]) -> RawTable {
        RawTable::new(
            kind,
            ids.iter()
                .map(|id| RawRecord::from_pairs([(column, *id)]))
                .collect(),
        )
    }

    #[test]
    fn test_build_collects_keys() {
        let index = ReferenceIndex::build(
            &table(TableKind::Users, "user_id", &["u1", "u2"]),
            &table(TableKind::Recipes, "recipe_id", &["rec_1", "rec_2"]),
            &table(TableKind::Ingredients, "recipe_id", &["rec_1", "rec_1"]),
            &table(TableKind::Steps, "recipe_id", &["rec_2", ""]),
        );
        assert!(index.has_user("u2"));
        assert!(!index.has_user("u3"));
        assert!(index.has_recipe("rec_1"));
        assert_eq!(index.recipes_with_ingredients.len(), 1);
        assert!(index.recipes_with_steps.contains(""));
    }
}
