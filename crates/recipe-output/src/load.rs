//! Deciding which uploaded objects become which warehouse tables.

use tracing::{debug, info};

use recipe_model::{EXPORT_PREFIX, TABLE_FILE_EXTENSION};

/// Warehouse table of the `recipe.csv` export.
const RECIPE_FILE_STEM: &str = "recipe";
const RECIPE_TABLE: &str = "recipes";

/// Fully qualified warehouse location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRef {
    pub project: String,
    pub dataset: String,
}

impl DatasetRef {
    pub fn new(project: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
        }
    }

    /// `<project>.<dataset>.<table>`.
    pub fn table_id(&self, table: &str) -> String {
        format!("{}.{}.{table}", self.project, self.dataset)
    }
}

/// One load job: an uploaded object and the table it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTarget {
    pub object_key: String,
    pub table: String,
    pub table_id: String,
}

impl LoadTarget {
    /// Plan the load of one object.
    ///
    /// Returns `None` unless the key lies under the export prefix and carries
    /// the table file extension. The table name is the base file stem, with the
    /// singular `recipe` export mapped to `recipes`.
    pub fn from_object_key(key: &str, dataset: &DatasetRef) -> Option<Self> {
        let file_name = key.strip_prefix(EXPORT_PREFIX)?.rsplit('/').next()?;
        let stem = file_name.strip_suffix(TABLE_FILE_EXTENSION)?;
        if stem.is_empty() {
            return None;
        }
        let table = if stem == RECIPE_FILE_STEM {
            RECIPE_TABLE
        } else {
            stem
        };
        Some(Self {
            object_key: key.to_string(),
            table: table.to_string(),
            table_id: dataset.table_id(table),
        })
    }
}

/// Plan loads for every eligible key; others are skipped with a log line.
pub fn plan_loads<'a>(
    keys: impl IntoIterator<Item = &'a str>,
    dataset: &DatasetRef,
) -> Vec<LoadTarget> {
    let mut targets = Vec::new();
    for key in keys {
        match LoadTarget::from_object_key(key, dataset) {
            Some(target) => {
                debug!(key, table_id = %target.table_id, "planned load");
                targets.push(target);
            }
            None => info!(key, "skipping object outside the export set"),
        }
    }
    targets
}
