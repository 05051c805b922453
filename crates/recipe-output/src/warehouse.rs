//! Analytical warehouse loading.
//!
//! Loads treat the first row as a header, infer column types from the data,
//! and fully replace any existing table.

use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{OutputError, Result};
use crate::load::{DatasetRef, LoadTarget};
use crate::store::ObjectStore;

/// Extension of the schema file stored next to each table.
pub const SCHEMA_FILE_SUFFIX: &str = ".schema.json";

/// Inferred type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
}

/// Result of one completed load job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedTable {
    pub table_id: String,
    pub rows: usize,
    pub columns: Vec<ColumnSchema>,
}

/// Destination of load jobs.
pub trait Warehouse {
    fn dataset(&self) -> &DatasetRef;

    /// Replace the target table with the delimited text in `bytes`.
    fn load_csv(&self, target: &LoadTarget, bytes: &[u8]) -> Result<LoadedTable>;
}

/// Warehouse kept on disk: `<root>/<project>/<dataset>/<table>.csv`.
#[derive(Debug, Clone)]
pub struct LocalWarehouse {
    dataset: DatasetRef,
    dir: PathBuf,
}

impl LocalWarehouse {
    /// Open the dataset directory, creating it when absent.
    pub fn open(root: &Path, dataset: DatasetRef) -> Result<Self> {
        let dir = root.join(&dataset.project).join(&dataset.dataset);
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|source| OutputError::Warehouse {
                path: dir.clone(),
                source,
            })?;
            info!(dataset = %dataset.dataset, path = %dir.display(), "created dataset");
        }
        Ok(Self { dataset, dir })
    }

    /// Directory holding the dataset's tables.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.csv"))
    }

    /// Sibling file a load writes before it replaces the table.
    fn staging_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!(".{table}.csv.partial"))
    }

    pub fn schema_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}{SCHEMA_FILE_SUFFIX}"))
    }
}

impl Warehouse for LocalWarehouse {
    fn dataset(&self) -> &DatasetRef {
        &self.dataset
    }

    fn load_csv(&self, target: &LoadTarget, bytes: &[u8]) -> Result<LoadedTable> {
        let load_error = |source| OutputError::Load {
            table_id: target.table_id.clone(),
            source,
        };
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()
            .map_err(load_error)?;

        let columns: Vec<ColumnSchema> = df
            .get_columns()
            .iter()
            .map(|column| ColumnSchema {
                name: column.name().to_string(),
                data_type: warehouse_type(column.dtype()).to_string(),
            })
            .collect();

        let table_path = self.table_path(&target.table);
        let staging_path = self.staging_path(&target.table);
        let staging_error = |source| OutputError::Warehouse {
            path: staging_path.clone(),
            source,
        };
        let mut file = File::create(&staging_path).map_err(staging_error)?;
        let written = CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df);
        drop(file);
        if let Err(source) = written {
            let _ = fs::remove_file(&staging_path);
            return Err(load_error(source));
        }
        fs::rename(&staging_path, &table_path).map_err(|source| OutputError::Warehouse {
            path: table_path.clone(),
            source,
        })?;

        let schema_path = self.schema_path(&target.table);
        let schema = serde_json::to_vec_pretty(&columns).map_err(|source| OutputError::Schema {
            table_id: target.table_id.clone(),
            source,
        })?;
        fs::write(&schema_path, schema).map_err(|source| OutputError::Warehouse {
            path: schema_path.clone(),
            source,
        })?;

        debug!(table_id = %target.table_id, path = %table_path.display(), "table replaced");
        Ok(LoadedTable {
            table_id: target.table_id.clone(),
            rows: df.height(),
            columns,
        })
    }
}

/// Warehouse type name of an inferred column type.
pub fn warehouse_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Boolean => "BOOLEAN",
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 => "INTEGER",
        DataType::Float32 | DataType::Float64 => "FLOAT",
        _ => "STRING",
    }
}

/// Run one load job per target, reading each object from `store`.
///
/// The first failure aborts the run.
pub fn load_all(
    store: &dyn ObjectStore,
    warehouse: &dyn Warehouse,
    targets: &[LoadTarget],
) -> Result<Vec<LoadedTable>> {
    let mut loaded = Vec::with_capacity(targets.len());
    for target in targets {
        info!(
            key = %target.object_key,
            table_id = %target.table_id,
            "loading {}/{}",
            store.bucket(),
            target.object_key
        );
        let bytes = store.get(&target.object_key)?;
        let table = warehouse.load_csv(target, &bytes)?;
        info!(table_id = %table.table_id, rows = table.rows, "loaded {} rows", table.rows);
        loaded.push(table);
    }
    Ok(loaded)
}
