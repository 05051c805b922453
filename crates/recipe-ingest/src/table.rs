//! Reading materialized tables back as string-cell records.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use recipe_model::{RawRecord, RawTable, TableKind, TableLayout};

use crate::error::{IngestError, Result};

/// Read one table file into string-cell records.
///
/// Header names are stripped of BOM characters and surrounding whitespace.
/// Cell values are kept verbatim so that validation sees exactly what the
/// file holds. Short rows leave their trailing columns absent.
pub fn read_raw_table(path: &Path, kind: TableKind) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::TableNotFound {
            table: kind,
            path: path.to_path_buf(),
        });
    }
    let csv_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let mut row = RawRecord::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(idx) {
                row.insert(header.as_str(), value);
            }
        }
        records.push(row);
    }

    debug!(table = %kind, rows = records.len(), path = %path.display(), "read table");
    Ok(RawTable::new(kind, records))
}

/// Read all five tables from `dir`, in validation order.
///
/// # Errors
///
/// Returns [`IngestError::TableNotFound`] for the first table whose file is
/// missing.
pub fn load_raw_tables(dir: &Path, layout: TableLayout) -> Result<Vec<RawTable>> {
    TableKind::VALIDATION_ORDER
        .iter()
        .map(|kind| read_raw_table(&dir.join(kind.file_name(layout)), *kind))
        .collect()
}
