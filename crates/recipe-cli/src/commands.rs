use comfy_table::Table;
use tracing::error;

use recipe_cli::config::{RunConfig, TableInput};
use recipe_cli::pipeline::{self, failure_message};
use recipe_ingest::SeedOptions;
use recipe_model::TableKind;
use recipe_output::DatasetRef;

use crate::cli::{
    BucketArgs, ExtractArgs, LoadArgs, ReportArgs, RunArgs, SeedArgs, SourceArgs, ValidateArgs,
    WarehouseArgs,
};
use crate::summary::{
    apply_table_style, header_cell, print_extract_summary, print_load_summary,
    print_seed_summary, print_validation_summary,
};

pub fn run_seed(args: &SeedArgs) -> i32 {
    let options = SeedOptions {
        seed: args.seed,
        synthetic_users: args.users,
        synthetic_recipes: args.recipes,
        interactions: args.interactions,
        ..SeedOptions::default()
    };
    match pipeline::seed(&args.source.source_dir, &options) {
        Ok(result) => {
            print_seed_summary(&result);
            0
        }
        Err(err) => fail(&err),
    }
}

pub fn run_extract(args: &ExtractArgs) -> i32 {
    let config = with_bucket(with_source(RunConfig::default(), &args.source), &args.bucket);
    match pipeline::extract(&config) {
        Ok(result) => {
            print_extract_summary(&result);
            println!("{}", result.success_message());
            0
        }
        Err(err) => fail(&err),
    }
}

pub fn run_load(args: &LoadArgs) -> i32 {
    let config = with_warehouse(
        with_bucket(RunConfig::default(), &args.bucket),
        &args.warehouse,
    );
    match pipeline::load(&config) {
        Ok(result) => {
            print_load_summary(&result);
            0
        }
        Err(err) => fail(&err),
    }
}

pub fn run_validate(args: &ValidateArgs) -> i32 {
    let config = with_report(
        with_warehouse(RunConfig::default(), &args.warehouse),
        &args.report,
    );
    let input = match &args.tables_dir {
        Some(dir) => TableInput::new(dir, args.layout.into()),
        None => TableInput::warehouse(&config),
    };
    match pipeline::validate_tables(&input, &config.report_path) {
        Ok(result) => {
            print_validation_summary(&result);
            validation_exit_code(result.report.fail_count(), args.report.fail_on_issues)
        }
        Err(err) => fail(&err),
    }
}

pub fn run_pipeline(args: &RunArgs) -> i32 {
    let config = with_report(
        with_warehouse(
            with_bucket(with_source(RunConfig::default(), &args.source), &args.bucket),
            &args.warehouse,
        ),
        &args.report,
    );
    match pipeline::run(&config) {
        Ok(result) => {
            print_extract_summary(&result.extract);
            print_load_summary(&result.load);
            print_validation_summary(&result.validation);
            println!("{}", result.extract.success_message());
            validation_exit_code(
                result.validation.report.fail_count(),
                args.report.fail_on_issues,
            )
        }
        Err(err) => fail(&err),
    }
}

pub fn run_tables() -> i32 {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Export File"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    for kind in TableKind::ALL {
        table.add_row(vec![
            kind.table_name().to_string(),
            kind.export_key(),
            kind.columns().join(", "),
        ]);
    }
    println!("{table}");
    0
}

fn fail(err: &anyhow::Error) -> i32 {
    error!("{err:#}");
    eprintln!("{}", failure_message(err));
    1
}

fn validation_exit_code(failures: usize, fail_on_issues: bool) -> i32 {
    if failures > 0 && fail_on_issues { 1 } else { 0 }
}

fn with_source(config: RunConfig, args: &SourceArgs) -> RunConfig {
    RunConfig {
        source_dir: args.source_dir.clone(),
        ..config
    }
}

fn with_bucket(config: RunConfig, args: &BucketArgs) -> RunConfig {
    RunConfig {
        bucket_dir: args.bucket_dir.clone(),
        bucket_name: args.bucket_name.clone(),
        ..config
    }
}

fn with_warehouse(config: RunConfig, args: &WarehouseArgs) -> RunConfig {
    RunConfig {
        warehouse_dir: args.warehouse_dir.clone(),
        dataset: DatasetRef::new(args.project_id.as_str(), args.dataset_id.as_str()),
        ..config
    }
}

fn with_report(config: RunConfig, args: &ReportArgs) -> RunConfig {
    RunConfig {
        report_path: args.report_path.clone(),
        ..config
    }
}
