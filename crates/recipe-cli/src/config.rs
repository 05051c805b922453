//! Resolved run configuration.

use std::path::{Path, PathBuf};

use recipe_model::TableLayout;
use recipe_output::{DatasetRef, OutputError};

/// Everything a pipeline stage needs to locate its source and sinks.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_dir: PathBuf,
    pub bucket_dir: PathBuf,
    pub bucket_name: Option<String>,
    pub warehouse_dir: PathBuf,
    pub dataset: DatasetRef,
    pub report_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data/source"),
            bucket_dir: PathBuf::from("data/buckets"),
            bucket_name: None,
            warehouse_dir: PathBuf::from("data/warehouse"),
            dataset: DatasetRef::new("local", "recipe_analytics"),
            report_path: PathBuf::from("validation_report.csv"),
        }
    }
}

impl RunConfig {
    /// The configured bucket name.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::BucketNameMissing`] when unset or blank.
    pub fn bucket_name(&self) -> Result<&str, OutputError> {
        self.bucket_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(OutputError::BucketNameMissing)
    }

    /// Directory of the warehouse dataset.
    pub fn dataset_dir(&self) -> PathBuf {
        self.warehouse_dir
            .join(&self.dataset.project)
            .join(&self.dataset.dataset)
    }
}

/// Where the validator reads its five tables from.
#[derive(Debug, Clone)]
pub struct TableInput {
    pub dir: PathBuf,
    pub layout: TableLayout,
}

impl TableInput {
    pub fn new(dir: impl Into<PathBuf>, layout: TableLayout) -> Self {
        Self {
            dir: dir.into(),
            layout,
        }
    }

    /// The tables of the configured warehouse dataset.
    pub fn warehouse(config: &RunConfig) -> Self {
        Self::new(config.dataset_dir(), TableLayout::Warehouse)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_required() {
        let mut config = RunConfig::default();
        assert!(matches!(
            config.bucket_name(),
            Err(OutputError::BucketNameMissing)
        ));
        config.bucket_name = Some("   ".to_string());
        assert!(config.bucket_name().is_err());
        config.bucket_name = Some(" recipes ".to_string());
        assert_eq!(config.bucket_name().unwrap(), "recipes");
    }

    #[test]
    fn test_warehouse_input() {
        let config = RunConfig {
            warehouse_dir: PathBuf::from("wh"),
            dataset: DatasetRef::new("proj", "ds"),
            ..RunConfig::default()
        };
        let input = TableInput::warehouse(&config);
        assert_eq!(input.dir(), Path::new("wh/proj/ds"));
        assert_eq!(input.layout, TableLayout::Warehouse);
    }
}
