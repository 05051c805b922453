//! Delimited-text encoding of the five row sets.

use csv::WriterBuilder;
use tracing::debug;

use recipe_model::{RowSets, TableKind};

use crate::error::{ReportError, Result};
use crate::fingerprint::sha256_hex;

/// One table encoded for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTable {
    pub kind: TableKind,
    /// Data rows, header excluded.
    pub rows: usize,
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`.
    pub sha256: String,
}

impl EncodedTable {
    pub fn file_name(&self) -> &'static str {
        self.kind.export_file_name()
    }

    pub fn object_key(&self) -> String {
        self.kind.export_key()
    }
}

/// Encode one table with a header row matching its fixed column list.
pub fn encode_table(rows: &RowSets, kind: TableKind) -> Result<EncodedTable> {
    let csv_error = |source: csv::Error| ReportError::EncodeTable { table: kind, source };

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(kind.columns()).map_err(csv_error)?;
    let cells = rows.cells(kind);
    for record in &cells {
        writer.write_record(record).map_err(csv_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv_error(csv::Error::from(err.into_error())))?;

    let sha256 = sha256_hex(&bytes);
    debug!(table = %kind, rows = cells.len(), sha256 = %sha256, "encoded table");
    Ok(EncodedTable {
        kind,
        rows: cells.len(),
        bytes,
        sha256,
    })
}

/// Encode all five tables in export order.
pub fn encode_row_sets(rows: &RowSets) -> Result<Vec<EncodedTable>> {
    TableKind::ALL
        .iter()
        .map(|kind| encode_table(rows, *kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_model::{InteractionRow, StepRow};

    #[test]
    fn test_empty_table_is_header_only() {
        let encoded = encode_table(&RowSets::default(), TableKind::Ingredients).unwrap();
        assert_eq!(encoded.rows, 0);
        assert_eq!(
            String::from_utf8(encoded.bytes).unwrap(),
            "recipe_id,name,quantity,unit\n"
        );
    }

    #[test]
    fn test_encode_quotes_when_needed() {
        let rows = RowSets {
            steps: vec![StepRow {
                recipe_id: "rec_1".to_string(),
                step_number: 1,
                instruction: "Add chicken, cook 5 min".to_string(),
            }],
            interactions: vec![InteractionRow {
                interaction_id: "int_0000".to_string(),
                interaction_type: "view".to_string(),
                ..InteractionRow::default()
            }],
            ..RowSets::default()
        };
        let steps = encode_table(&rows, TableKind::Steps).unwrap();
        assert_eq!(
            String::from_utf8(steps.bytes).unwrap(),
            "recipe_id,step_number,instruction\nrec_1,1,\"Add chicken, cook 5 min\"\n"
        );

        let interactions = encode_table(&rows, TableKind::Interactions).unwrap();
        assert_eq!(
            String::from_utf8(interactions.bytes).unwrap(),
            "interaction_id,user_id,recipe_id,type,rating,timestamp\nint_0000,,,view,,\n"
        );
    }

    #[test]
    fn test_encode_row_sets_uses_export_names() {
        let encoded = encode_row_sets(&RowSets::default()).unwrap();
        let keys: Vec<String> = encoded.iter().map(EncodedTable::object_key).collect();
        assert_eq!(
            keys,
            vec![
                "backups/users.csv",
                "backups/recipe.csv",
                "backups/ingredients.csv",
                "backups/steps.csv",
                "backups/interactions.csv",
            ]
        );
    }
}
