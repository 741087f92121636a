//! Report export
//!
//! Writes a generated report to a dated text file.

use crate::state::ReportResult;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name used for a report generated on `date`
pub fn report_filename(date: NaiveDate) -> String {
    format!("seo-report-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes `report` into `dir` and returns the file path
///
/// The file is named after the report's generation date, so a second report
/// on the same day overwrites the first.
pub fn write_report(report: &ReportResult, dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_filename(report.generated_at.date_naive()));

    let mut file = File::create(&path)?;
    file.write_all(report.text.as_bytes())?;
    if !report.text.ends_with('\n') {
        file.write_all(b"\n")?;
    }

    tracing::info!("Report written to {}", path.display());
    Ok(path)
}
