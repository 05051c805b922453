use std::path::PathBuf;

use recipe_model::{EXPORT_PREFIX, TableKind};
use recipe_output::{DatasetRef, LoadedTable};
use recipe_report::Manifest;
use recipe_validate::ValidationReport;

#[derive(Debug)]
pub struct SeedResult {
    pub source_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub users: usize,
    pub recipes: usize,
    pub interactions: usize,
}

#[derive(Debug)]
pub struct ExtractResult {
    pub bucket: String,
    pub manifest: Manifest,
    pub keys: Vec<String>,
    /// Tables whose content differs from the previous extract; `None` on a
    /// first extract into the bucket.
    pub changed: Option<Vec<TableKind>>,
}

impl ExtractResult {
    pub fn rows(&self, table: TableKind) -> usize {
        self.manifest
            .tables
            .iter()
            .find(|entry| entry.table == table)
            .map_or(0, |entry| entry.rows)
    }

    pub fn recipes(&self) -> usize {
        self.rows(TableKind::Recipes)
    }

    /// Message returned to the trigger on success.
    pub fn success_message(&self) -> String {
        format!(
            "Success! Processed {} recipes. Files in {}/{EXPORT_PREFIX}",
            self.recipes(),
            self.bucket
        )
    }
}

#[derive(Debug)]
pub struct LoadResult {
    pub dataset: DatasetRef,
    pub loaded: Vec<LoadedTable>,
    pub skipped: Vec<String>,
}

#[derive(Debug)]
pub struct ValidateResult {
    pub input: PathBuf,
    pub report_path: PathBuf,
    pub report: ValidationReport,
}

#[derive(Debug)]
pub struct RunResult {
    pub extract: ExtractResult,
    pub load: LoadResult,
    pub validation: ValidateResult,
}
