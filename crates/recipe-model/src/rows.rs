//! Typed row records produced by the denormalizer.
//!
//! Cells that come straight from a source document are kept as text so that
//! malformed values survive extraction and can be reported by the validator.
//! An empty string means the source field was absent.

use serde::{Deserialize, Serialize};

use crate::table::TableKind;

/// A record with a fixed position in one of the five tables.
pub trait TableRow {
    /// Table this record belongs to.
    const TABLE: TableKind;

    /// Cell values in the table's column order.
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl TableRow for UserRow {
    const TABLE: TableKind = TableKind::Users;

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.username.clone(),
            self.email.clone(),
            self.created_at.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRow {
    pub recipe_id: String,
    pub title: String,
    /// Logical reference to a user; not checked at extract time.
    pub author_id: String,
    pub prep_time_minutes: String,
    pub difficulty: String,
    pub created_at: String,
}

impl TableRow for RecipeRow {
    const TABLE: TableKind = TableKind::Recipes;

    fn cells(&self) -> Vec<String> {
        vec![
            self.recipe_id.clone(),
            self.title.clone(),
            self.author_id.clone(),
            self.prep_time_minutes.clone(),
            self.difficulty.clone(),
            self.created_at.clone(),
        ]
    }
}

/// Ingredient embedded in a recipe. Identity is positional within the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub recipe_id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

impl TableRow for IngredientRow {
    const TABLE: TableKind = TableKind::Ingredients;

    fn cells(&self) -> Vec<String> {
        vec![
            self.recipe_id.clone(),
            self.name.clone(),
            self.quantity.clone(),
            self.unit.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRow {
    pub recipe_id: String,
    /// 1-based position in the source `steps` list.
    pub step_number: u32,
    pub instruction: String,
}

impl TableRow for StepRow {
    const TABLE: TableKind = TableKind::Steps;

    fn cells(&self) -> Vec<String> {
        vec![
            self.recipe_id.clone(),
            self.step_number.to_string(),
            self.instruction.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRow {
    pub interaction_id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub interaction_type: String,
    /// Only some interactions carry a rating.
    pub rating: Option<String>,
    pub timestamp: String,
}

impl TableRow for InteractionRow {
    const TABLE: TableKind = TableKind::Interactions;

    fn cells(&self) -> Vec<String> {
        vec![
            self.interaction_id.clone(),
            self.user_id.clone(),
            self.recipe_id.clone(),
            self.interaction_type.clone(),
            self.rating.clone().unwrap_or_default(),
            self.timestamp.clone(),
        ]
    }
}

/// The five row sets produced by one denormalizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSets {
    pub users: Vec<UserRow>,
    pub recipes: Vec<RecipeRow>,
    pub ingredients: Vec<IngredientRow>,
    pub steps: Vec<StepRow>,
    pub interactions: Vec<InteractionRow>,
}

impl RowSets {
    /// Number of rows in the given table.
    pub fn row_count(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Users => self.users.len(),
            TableKind::Recipes => self.recipes.len(),
            TableKind::Ingredients => self.ingredients.len(),
            TableKind::Steps => self.steps.len(),
            TableKind::Interactions => self.interactions.len(),
        }
    }

    /// Rows across all five tables.
    pub fn total_rows(&self) -> usize {
        TableKind::ALL.iter().map(|kind| self.row_count(*kind)).sum()
    }

    /// Cell grid of one table, header excluded.
    pub fn cells(&self, kind: TableKind) -> Vec<Vec<String>> {
        match kind {
            TableKind::Users => self.users.iter().map(TableRow::cells).collect(),
            TableKind::Recipes => self.recipes.iter().map(TableRow::cells).collect(),
            TableKind::Ingredients => self.ingredients.iter().map(TableRow::cells).collect(),
            TableKind::Steps => self.steps.iter().map(TableRow::cells).collect(),
            TableKind::Interactions => self.interactions.iter().map(TableRow::cells).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_match_column_count() {
        let sets = RowSets {
            users: vec![UserRow::default()],
            recipes: vec![RecipeRow::default()],
            ingredients: vec![IngredientRow::default()],
            steps: vec![StepRow::default()],
            interactions: vec![InteractionRow::default()],
        };
        for kind in TableKind::ALL {
            let cells = sets.cells(kind);
            assert_eq!(cells.len(), 1);
            assert_eq!(cells[0].len(), kind.columns().len(), "{kind}");
        }
        assert_eq!(sets.total_rows(), 5);
    }

    #[test]
    fn test_missing_rating_renders_empty() {
        let row = InteractionRow {
            interaction_id: "int_0001".to_string(),
            interaction_type: "view".to_string(),
            rating: None,
            ..InteractionRow::default()
        };
        assert_eq!(row.cells()[4], "");
        assert_eq!(row.cells()[3], "view");
    }
}
