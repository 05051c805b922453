//! Per-record verdicts and the aggregate validation report.

use chrono::NaiveDateTime;

use recipe_model::{RawRecord, TableKind};

use crate::issue::{Issue, Status};

/// Display format of `validated_at` in the report.
pub const VALIDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder identifier for a record with none of the key fields set.
pub const MISSING_RECORD_ID: &str = "N/A";

/// Key fields tried, in order, when naming a record in the report.
const RECORD_ID_FIELDS: [&str; 3] = ["recipe_id", "user_id", "interaction_id"];

/// Report identifier of a record: its first non-empty key field.
///
/// The preference order is fixed across tables, so an interaction is named
/// by its `recipe_id` when it has one.
pub fn record_id(record: &RawRecord) -> String {
    RECORD_ID_FIELDS
        .iter()
        .find_map(|field| record.non_empty(field))
        .unwrap_or(MISSING_RECORD_ID)
        .to_string()
}

/// Validation outcome for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub table: TableKind,
    pub record_id: String,
    pub issues: Vec<Issue>,
    pub validated_at: NaiveDateTime,
}

impl Verdict {
    pub fn status(&self) -> Status {
        Status::from_issues(&self.issues)
    }

    pub fn is_fail(&self) -> bool {
        self.status() == Status::Fail
    }

    pub fn validated_at_display(&self) -> String {
        self.validated_at.format(VALIDATED_AT_FORMAT).to_string()
    }
}

/// Record and failure counts for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub table: TableKind,
    pub records: usize,
    pub failures: usize,
}

impl TableSummary {
    pub fn passes(&self) -> usize {
        self.records - self.failures
    }
}

/// Every verdict of one run, in validation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub validated_at: NaiveDateTime,
    pub verdicts: Vec<Verdict>,
}

impl ValidationReport {
    /// Total FAIL verdicts across all tables.
    pub fn fail_count(&self) -> usize {
        self.verdicts.iter().filter(|verdict| verdict.is_fail()).count()
    }

    /// True when no table has a failing record.
    pub fn is_clean(&self) -> bool {
        self.fail_count() == 0
    }

    pub fn verdicts_for(&self, table: TableKind) -> impl Iterator<Item = &Verdict> {
        self.verdicts
            .iter()
            .filter(move |verdict| verdict.table == table)
    }

    /// One summary per table, in validation order.
    pub fn table_summaries(&self) -> Vec<TableSummary> {
        TableKind::VALIDATION_ORDER
            .iter()
            .map(|&table| TableSummary {
                table,
                records: self.verdicts_for(table).count(),
                failures: self.verdicts_for(table).filter(|v| v.is_fail()).count(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_record_id_preference() {
        let interaction = RawRecord::from_pairs([
            ("interaction_id", "int_0001"),
            ("user_id", "u1"),
            ("recipe_id", "rec_1"),
        ]);
        assert_eq!(record_id(&interaction), "rec_1");

        let user = RawRecord::from_pairs([("user_id", "u1"), ("recipe_id", "")]);
        assert_eq!(record_id(&user), "u1");

        let orphan = RawRecord::from_pairs([("interaction_id", "int_0002")]);
        assert_eq!(record_id(&orphan), "int_0002");

        assert_eq!(record_id(&RawRecord::new()), MISSING_RECORD_ID);
    }

    #[test]
    fn test_validated_at_display() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        let verdict = Verdict {
            table: TableKind::Users,
            record_id: "u1".to_string(),
            issues: vec![],
            validated_at: at,
        };
        assert_eq!(verdict.validated_at_display(), "2025-03-09 07:05:01");
        assert_eq!(verdict.status(), Status::Pass);
    }
}
