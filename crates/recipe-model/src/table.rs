//! The fixed table contract shared by every stage.
//!
//! Column order and names are part of the external interface: the exported
//! files carry them as the header row and the warehouse infers its schema
//! from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Object-storage prefix under which exported tables are written.
pub const EXPORT_PREFIX: &str = "backups/";

/// File extension of exported tables.
pub const TABLE_FILE_EXTENSION: &str = ".csv";

const USER_COLUMNS: &[&str] = &["user_id", "username", "email", "created_at"];
const RECIPE_COLUMNS: &[&str] = &[
    "recipe_id",
    "title",
    "author_id",
    "prep_time_minutes",
    "difficulty",
    "created_at",
];
const INGREDIENT_COLUMNS: &[&str] = &["recipe_id", "name", "quantity", "unit"];
const STEP_COLUMNS: &[&str] = &["recipe_id", "step_number", "instruction"];
const INTERACTION_COLUMNS: &[&str] = &[
    "interaction_id",
    "user_id",
    "recipe_id",
    "type",
    "rating",
    "timestamp",
];

/// One of the five denormalized tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Users,
    Recipes,
    Ingredients,
    Steps,
    Interactions,
}

impl TableKind {
    /// Export order used by the denormalizer.
    pub const ALL: [TableKind; 5] = [
        TableKind::Users,
        TableKind::Recipes,
        TableKind::Ingredients,
        TableKind::Steps,
        TableKind::Interactions,
    ];

    /// Order in which the validator walks the tables and lists verdicts.
    pub const VALIDATION_ORDER: [TableKind; 5] = [
        TableKind::Users,
        TableKind::Recipes,
        TableKind::Interactions,
        TableKind::Ingredients,
        TableKind::Steps,
    ];

    /// Column names in header order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Users => USER_COLUMNS,
            TableKind::Recipes => RECIPE_COLUMNS,
            TableKind::Ingredients => INGREDIENT_COLUMNS,
            TableKind::Steps => STEP_COLUMNS,
            TableKind::Interactions => INTERACTION_COLUMNS,
        }
    }

    /// Warehouse table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            TableKind::Users => "users",
            TableKind::Recipes => "recipes",
            TableKind::Ingredients => "ingredients",
            TableKind::Steps => "steps",
            TableKind::Interactions => "interactions",
        }
    }

    /// Exported file name. The recipes table keeps its historical singular
    /// file name; the warehouse loader maps it back to `recipes`.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            TableKind::Users => "users.csv",
            TableKind::Recipes => "recipe.csv",
            TableKind::Ingredients => "ingredients.csv",
            TableKind::Steps => "steps.csv",
            TableKind::Interactions => "interactions.csv",
        }
    }

    /// Object key of the exported file.
    pub fn export_key(&self) -> String {
        format!("{EXPORT_PREFIX}{}", self.export_file_name())
    }

    /// Label used in the validation report's `Table` column.
    pub fn report_label(&self) -> &'static str {
        match self {
            TableKind::Users => "Users",
            TableKind::Recipes => "Recipes",
            TableKind::Ingredients => "Ingredients",
            TableKind::Steps => "Steps",
            TableKind::Interactions => "Interactions",
        }
    }

    /// File name of this table inside a directory with the given layout.
    pub fn file_name(&self, layout: TableLayout) -> String {
        match layout {
            TableLayout::Export => self.export_file_name().to_string(),
            TableLayout::Warehouse => format!("{}{TABLE_FILE_EXTENSION}", self.table_name()),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

impl FromStr for TableKind {
    type Err = String;

    /// Accepts the warehouse name, the export file stem, or the report label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "users" | "user" => Ok(TableKind::Users),
            "recipes" | "recipe" => Ok(TableKind::Recipes),
            "ingredients" | "ingredient" => Ok(TableKind::Ingredients),
            "steps" | "step" => Ok(TableKind::Steps),
            "interactions" | "interaction" => Ok(TableKind::Interactions),
            _ => Err(format!("Unknown table: {s}")),
        }
    }
}

/// Naming convention of a directory holding the five tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
    /// Exported files (`recipe.csv` for the recipes table).
    #[default]
    Export,
    /// Warehouse dataset (`recipes.csv`).
    Warehouse,
}
