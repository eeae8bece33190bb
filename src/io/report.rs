//! Read/write report JSON files.
//!
//! Report JSON is the portable record of a check run:
//! - tool name and generation time
//! - how many bond numbers were checked
//! - one `MatchReport` per bond type
//!
//! The schema is defined by `domain::ReportFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{MatchReport, ReportFile};
use crate::error::{AppError, EXIT_INPUT};

/// Write a report JSON file.
pub fn write_report_json(path: &Path, reports: &[MatchReport], bonds_checked: usize) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    let report = ReportFile {
        tool: "pbc".to_string(),
        generated_at: Utc::now(),
        bonds_checked,
        reports: reports.to_vec(),
    };

    serde_json::to_writer_pretty(file, &report)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid report JSON: {e}")))?;
    Ok(report)
}
