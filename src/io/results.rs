//! Read/write experiment report JSON files.
//!
//! The report JSON is the portable record of a run: configuration, partition
//! sizes and baseline scores, so runs can be compared without re-executing.
//! The schema is defined by `report::ExperimentReport`.

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::report::ExperimentReport;

/// Write any serialisable report as pretty JSON.
pub fn write_report_json<T: Serialize>(path: &Path, report: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))
}

/// Read an experiment report JSON file.
pub fn read_report_json(path: &Path) -> Result<ExperimentReport, AppError> {
    read_json(path)
}
