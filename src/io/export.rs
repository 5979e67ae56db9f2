//! CSV exports: datasets and per-row partition assignments.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use csv::Writer;

use crate::domain::Dataset;
use crate::error::AppError;
use crate::split::SplitIndices;

fn create_writer(path: &Path, what: &str) -> Result<Writer<std::fs::File>, AppError> {
    Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create {what} CSV '{}': {e}", path.display())))
}

/// Write a dataset as `id,<features...>,los` so it can be re-ingested.
pub fn write_admissions_csv(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let mut writer = create_writer(path, "admissions")?;
    let row_err = |e: csv::Error| AppError::new(2, format!("Failed to write admissions CSV row: {e}"));

    let mut header = Vec::with_capacity(dataset.n_features() + 2);
    header.push("id".to_string());
    header.extend(dataset.feature_names.iter().cloned());
    header.push("los".to_string());
    writer.write_record(&header).map_err(row_err)?;

    for (i, id) in dataset.ids.iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push(id.clone());
        record.extend(dataset.features.row(i).iter().map(|v| v.to_string()));
        record.push(dataset.targets[i].to_string());
        writer.write_record(&record).map_err(row_err)?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush admissions CSV: {e}")))?;
    Ok(())
}

/// Write one `row,id,partition` line per source row, in source order.
pub fn write_assignments_csv(path: &Path, dataset: &Dataset, indices: &SplitIndices) -> Result<(), AppError> {
    let mut writer = create_writer(path, "assignments")?;
    let row_err = |e: csv::Error| AppError::new(2, format!("Failed to write assignments CSV row: {e}"));

    writer.write_record(["row", "id", "partition"]).map_err(row_err)?;
    for (row, part) in indices.assignments(dataset.n_rows()).into_iter().enumerate() {
        let part = part.map(|p| p.as_str()).unwrap_or("");
        writer
            .write_record([row.to_string().as_str(), dataset.ids[row].as_str(), part])
            .map_err(row_err)?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush assignments CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_admissions;
    use crate::io::ingest::{IngestOptions, load_admissions};
    use crate::split::{SplitFractions, split_indices};

    #[test]
    fn written_admissions_reload_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admissions.csv");
        let ds = generate_admissions(25, 4).unwrap();

        write_admissions_csv(&path, &ds).unwrap();
        let back = load_admissions(&path, &IngestOptions::default()).unwrap();

        assert!(back.row_errors.is_empty());
        assert_eq!(back.dataset, ds);
    }

    #[test]
    fn assignments_list_every_row_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assignments.csv");
        let ds = generate_admissions(20, 1).unwrap();
        let idx = split_indices(ds.n_rows(), SplitFractions::default(), 42).unwrap();

        write_assignments_csv(&path, &ds, &idx).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "row,id,partition");
        assert_eq!(lines.len(), 21);
        let n_train = lines.iter().filter(|l| l.ends_with(",train")).count();
        assert_eq!(n_train, idx.train.len());
        assert!(lines[1].starts_with("0,SYN-000001,"));
    }
}
