//! The validation report file.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use recipe_validate::{ValidationReport, Verdict};

use crate::error::{ReportError, Result};

/// Header row of the validation report.
pub const REPORT_HEADER: [&str; 5] = ["Table", "Record_ID", "Status", "Issues", "Validated_At"];

/// `Issues` cell of a record with nothing to report.
pub const NO_ISSUES: &str = "OK";

/// Separator between reasons in the `Issues` cell.
pub const ISSUE_SEPARATOR: &str = "; ";

/// `Issues` cell text for one verdict.
pub fn issues_cell(verdict: &Verdict) -> String {
    if verdict.issues.is_empty() {
        return NO_ISSUES.to_string();
    }
    verdict
        .issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(ISSUE_SEPARATOR)
}

/// Encode the report, one row per verdict in report order.
pub fn encode_validation_report(report: &ValidationReport) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(REPORT_HEADER)
        .map_err(ReportError::EncodeReport)?;
    for verdict in &report.verdicts {
        writer
            .write_record([
                verdict.table.report_label(),
                verdict.record_id.as_str(),
                verdict.status().as_str(),
                issues_cell(verdict).as_str(),
                verdict.validated_at_display().as_str(),
            ])
            .map_err(ReportError::EncodeReport)?;
    }
    writer
        .into_inner()
        .map_err(|err| ReportError::EncodeReport(csv::Error::from(err.into_error())))
}

/// Write the report to `path`, replacing any previous file.
///
/// Returns the number of data rows written.
pub fn write_validation_report(path: &Path, report: &ValidationReport) -> Result<usize> {
    let bytes = encode_validation_report(report)?;
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, bytes).map_err(write_error)?;
    info!(path = %path.display(), rows = report.verdicts.len(), "validation report written");
    Ok(report.verdicts.len())
}
