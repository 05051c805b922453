//! CLI argument definitions for the recipe ETL.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use recipe_model::TableLayout;

#[derive(Parser)]
#[command(
    name = "recipe-etl",
    version,
    about = "Recipe ETL - Denormalize recipe documents and validate the resulting tables",
    long_about = "Flatten the users, recipes and interactions collections into five CSV \
                  tables,\nupload them under backups/, load them into the warehouse and \
                  run the\ncross-table data quality validation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a demo document source.
    Seed(SeedArgs),

    /// Denormalize the source and upload the tables to the bucket.
    Extract(ExtractArgs),

    /// Load the uploaded tables into the warehouse.
    Load(LoadArgs),

    /// Validate the materialized tables and write the report.
    Validate(ValidateArgs),

    /// Extract, load and validate in one pass.
    Run(RunArgs),

    /// List the exported tables and their columns.
    Tables,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Directory holding one JSON-lines file per collection.
    #[arg(
        long = "source-dir",
        env = "SOURCE_DIR",
        value_name = "DIR",
        default_value = "data/source"
    )]
    pub source_dir: PathBuf,
}

#[derive(Args)]
pub struct BucketArgs {
    /// Root directory of the object storage.
    #[arg(
        long = "bucket-dir",
        env = "BUCKET_DIR",
        value_name = "DIR",
        default_value = "data/buckets"
    )]
    pub bucket_dir: PathBuf,

    /// Bucket receiving the exported tables.
    #[arg(long = "bucket-name", env = "BUCKET_NAME", value_name = "NAME")]
    pub bucket_name: Option<String>,
}

#[derive(Args)]
pub struct WarehouseArgs {
    /// Root directory of the warehouse.
    #[arg(
        long = "warehouse-dir",
        env = "WAREHOUSE_DIR",
        value_name = "DIR",
        default_value = "data/warehouse"
    )]
    pub warehouse_dir: PathBuf,

    /// Warehouse project.
    #[arg(long = "project-id", env = "PROJECT_ID", default_value = "local")]
    pub project_id: String,

    /// Warehouse dataset.
    #[arg(
        long = "dataset-id",
        env = "DATASET_ID",
        default_value = "recipe_analytics"
    )]
    pub dataset_id: String,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Destination of the validation report.
    #[arg(
        long = "report",
        env = "REPORT_PATH",
        value_name = "PATH",
        default_value = "validation_report.csv"
    )]
    pub report_path: PathBuf,

    /// Exit with status 1 when any record fails validation.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Parser)]
pub struct SeedArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// RNG seed for a reproducible source.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Number of synthetic users besides the featured author.
    #[arg(long = "users", default_value_t = 10)]
    pub users: usize,

    /// Number of synthetic recipes besides the featured recipe.
    #[arg(long = "recipes", default_value_t = 19)]
    pub recipes: usize,

    /// Number of interactions.
    #[arg(long = "interactions", default_value_t = 50)]
    pub interactions: usize,
}

#[derive(Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub bucket: BucketArgs,
}

#[derive(Parser)]
pub struct LoadArgs {
    #[command(flatten)]
    pub bucket: BucketArgs,

    #[command(flatten)]
    pub warehouse: WarehouseArgs,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Validate the CSV files in this directory instead of the warehouse dataset.
    #[arg(long = "tables-dir", value_name = "DIR")]
    pub tables_dir: Option<PathBuf>,

    /// File naming used inside `--tables-dir`.
    #[arg(long = "layout", value_enum, default_value = "export")]
    pub layout: LayoutArg,

    #[command(flatten)]
    pub warehouse: WarehouseArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub bucket: BucketArgs,

    #[command(flatten)]
    pub warehouse: WarehouseArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// CLI table layout choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// Export file names (`recipe.csv`).
    Export,
    /// Warehouse table names (`recipes.csv`).
    Warehouse,
}

impl From<LayoutArg> for TableLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Export => TableLayout::Export,
            LayoutArg::Warehouse => TableLayout::Warehouse,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
