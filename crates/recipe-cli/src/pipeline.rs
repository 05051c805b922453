//! Pipeline stages behind each subcommand.
//!
//! Every stage takes its configuration explicitly and opens its own source and
//! sink handles, which are dropped when the stage returns.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use recipe_ingest::{Collection, JsonLinesSource, SeedOptions, generate, load_raw_tables};
use recipe_model::TableKind;
use recipe_output::{
    LocalBucket, LocalWarehouse, ObjectStore, OutputError, load_all, plan_loads,
    previous_manifest, upload_extract,
};
use recipe_report::{Manifest, encode_row_sets, write_validation_report};
use recipe_transform::denormalize;
use recipe_validate::validate_now;

use crate::config::{RunConfig, TableInput};
use crate::types::{ExtractResult, LoadResult, RunResult, SeedResult, ValidateResult};

/// Write a demo document source under `source_dir`.
pub fn seed(source_dir: &Path, options: &SeedOptions) -> Result<SeedResult> {
    let span = info_span!("seed", source_dir = %source_dir.display());
    let _guard = span.enter();
    let source = generate(options);
    let files = source
        .write_to(source_dir)
        .with_context(|| format!("write source {}", source_dir.display()))?;
    let count = |collection: Collection| source.documents(collection).len();
    Ok(SeedResult {
        source_dir: source_dir.to_path_buf(),
        files,
        users: count(Collection::Users),
        recipes: count(Collection::Recipes),
        interactions: count(Collection::Interactions),
    })
}

/// Denormalize the source and upload the five tables plus a manifest.
pub fn extract(config: &RunConfig) -> Result<ExtractResult> {
    let bucket_name = config.bucket_name()?;
    let span = info_span!("extract", bucket = %bucket_name);
    let _guard = span.enter();
    let start = Instant::now();

    let source = JsonLinesSource::open(config.source_dir.as_path())
        .with_context(|| format!("open document source {}", config.source_dir.display()))?;
    let rows = denormalize(&source).context("denormalize documents")?;
    let tables = encode_row_sets(&rows).context("encode tables")?;
    let manifest = Manifest::from_tables(&tables);

    let store = LocalBucket::open(&config.bucket_dir, bucket_name)
        .with_context(|| format!("open bucket {bucket_name}"))?;
    let changed = previous_manifest(&store).map(|previous| manifest.changed_since(&previous));
    match &changed {
        Some(kinds) if kinds.is_empty() => info!("source unchanged since previous extract"),
        Some(kinds) => info!(changed = ?kinds, "tables changed since previous extract"),
        None => info!("no previous extract in bucket"),
    }
    let keys = upload_extract(&store, &tables).context("upload tables")?;

    info!(
        recipes = rows.row_count(TableKind::Recipes),
        objects = keys.len(),
        duration_ms = start.elapsed().as_millis(),
        "extract complete"
    );
    Ok(ExtractResult {
        bucket: store.bucket().to_string(),
        manifest,
        keys,
        changed,
    })
}

/// Load every eligible object of the bucket into the warehouse dataset.
pub fn load(config: &RunConfig) -> Result<LoadResult> {
    let bucket_name = config.bucket_name()?;
    let span = info_span!("load", dataset = %config.dataset.dataset);
    let _guard = span.enter();
    let start = Instant::now();

    let store = LocalBucket::open(&config.bucket_dir, bucket_name)
        .with_context(|| format!("open bucket {bucket_name}"))?;
    let keys = store.list("").context("list bucket")?;
    let targets = plan_loads(keys.iter().map(String::as_str), &config.dataset);
    let skipped: Vec<String> = keys
        .iter()
        .filter(|key| !targets.iter().any(|target| &target.object_key == *key))
        .cloned()
        .collect();
    if targets.is_empty() {
        warn!(bucket = %bucket_name, "no exported tables to load");
    }

    let warehouse = LocalWarehouse::open(&config.warehouse_dir, config.dataset.clone())
        .context("open warehouse dataset")?;
    let loaded = load_all(&store, &warehouse, &targets).context("load tables")?;

    info!(
        tables = loaded.len(),
        skipped = skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(LoadResult {
        dataset: config.dataset.clone(),
        loaded,
        skipped,
    })
}

/// Validate the five tables under `input` and write the report.
pub fn validate_tables(input: &TableInput, report_path: &Path) -> Result<ValidateResult> {
    let span = info_span!("validate", input = %input.dir().display());
    let _guard = span.enter();
    let start = Instant::now();

    let tables = load_raw_tables(input.dir(), input.layout)
        .with_context(|| format!("read tables from {}", input.dir().display()))?;
    let report = validate_now(&tables).context("validate tables")?;
    write_validation_report(report_path, &report).context("write validation report")?;

    let failures = report.fail_count();
    if failures == 0 {
        info!("data quality is clean");
    } else {
        warn!(failures, "found {failures} total issues");
    }
    info!(
        records = report.verdicts.len(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    Ok(ValidateResult {
        input: input.dir().to_path_buf(),
        report_path: report_path.to_path_buf(),
        report,
    })
}

/// Extract, load, then validate the loaded dataset.
pub fn run(config: &RunConfig) -> Result<RunResult> {
    let extract = extract(config)?;
    let load = load(config)?;
    let validation = validate_tables(&TableInput::warehouse(config), &config.report_path)?;
    Ok(RunResult {
        extract,
        load,
        validation,
    })
}

/// Message returned to the trigger when a stage fails.
pub fn failure_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<OutputError>() {
        Some(OutputError::BucketNameMissing) => "Error: BUCKET_NAME env var missing.".to_string(),
        _ => format!("Pipeline Failed: {error:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_bucket_name_message() {
        let config = RunConfig::default();
        let error = extract(&config).unwrap_err();
        assert_eq!(failure_message(&error), "Error: BUCKET_NAME env var missing.");
    }

    #[test]
    fn test_failure_message_carries_cause() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            source_dir: dir.path().join("absent"),
            bucket_dir: dir.path().join("buckets"),
            bucket_name: Some("recipes".to_string()),
            ..RunConfig::default()
        };
        let error = extract(&config).unwrap_err();
        let message = failure_message(&error);
        assert!(message.starts_with("Pipeline Failed: open document source"));
    }

    #[test]
    fn test_validate_missing_tables_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = TableInput::new(dir.path(), recipe_model::TableLayout::Export);
        let report: PathBuf = dir.path().join("report.csv");
        assert!(validate_tables(&input, &report).is_err());
        assert!(!report.exists());
    }
}
