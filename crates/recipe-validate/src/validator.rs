//! The validation pass over fully materialized tables.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, info_span};

use recipe_model::{RawTable, TableKind};

use crate::checks::check_record;
use crate::error::{Result, ValidateError};
use crate::index::ReferenceIndex;
use crate::report::{ValidationReport, Verdict, record_id};

/// Validate all five tables, stamping every verdict with `validated_at`.
///
/// All tables must be present and non-empty before any rule runs; the
/// reference index is built once from the complete inputs. When a table is
/// supplied more than once the first occurrence wins.
///
/// # Errors
///
/// Returns [`ValidateError::MissingTable`] or [`ValidateError::EmptyTable`]
/// for the first offending table in validation order.
pub fn validate(tables: &[RawTable], validated_at: NaiveDateTime) -> Result<ValidationReport> {
    let users = require(tables, TableKind::Users)?;
    let recipes = require(tables, TableKind::Recipes)?;
    let interactions = require(tables, TableKind::Interactions)?;
    let ingredients = require(tables, TableKind::Ingredients)?;
    let steps = require(tables, TableKind::Steps)?;

    let index = ReferenceIndex::build(users, recipes, ingredients, steps);

    let mut verdicts = Vec::new();
    for table in [users, recipes, interactions, ingredients, steps] {
        let span = info_span!("validate_table", table = %table.kind);
        let _guard = span.enter();
        let mut failures = 0usize;
        for record in &table.records {
            let issues = check_record(table.kind, record, &index);
            let verdict = Verdict {
                table: table.kind,
                record_id: record_id(record),
                issues,
                validated_at,
            };
            if verdict.is_fail() {
                failures += 1;
                let reasons: Vec<String> = verdict.issues.iter().map(ToString::to_string).collect();
                debug!("FAIL [{}]: {}", verdict.record_id, reasons.join(", "));
            }
            verdicts.push(verdict);
        }
        info!(records = table.len(), failures, "table validated");
    }

    let report = ValidationReport {
        validated_at,
        verdicts,
    };
    info!(
        records = report.verdicts.len(),
        failures = report.fail_count(),
        "validation complete"
    );
    Ok(report)
}

/// [`validate`] stamped with the current local time.
pub fn validate_now(tables: &[RawTable]) -> Result<ValidationReport> {
    validate(tables, Local::now().naive_local())
}

fn require(tables: &[RawTable], kind: TableKind) -> Result<&RawTable> {
    let table = tables
        .iter()
        .find(|table| table.kind == kind)
        .ok_or(ValidateError::MissingTable { table: kind })?;
    if table.is_empty() {
        return Err(ValidateError::EmptyTable { table: kind });
    }
    Ok(table)
}
