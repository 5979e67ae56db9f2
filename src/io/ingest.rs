//! CSV ingest of an admissions extract.
//!
//! Turns a warehouse CSV export into a row-aligned `Dataset`:
//!
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior**: row order is file order
//!
//! Length of stay comes from the target column when present, otherwise it is
//! derived from `admit_time` / `discharge_time` as fractional days. Every
//! remaining column that is not the id or explicitly ignored is a numeric
//! feature.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{Dataset, Observation};
use crate::error::AppError;

const ADMIT_COLUMN: &str = "admit_time";
const DISCHARGE_COLUMN: &str = "discharge_time";
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Column roles for an ingest.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Length-of-stay column (days).
    pub target_column: String,
    /// Optional identifier column; rows are numbered when it is absent.
    pub id_column: String,
    /// Columns excluded from the feature set (e.g. free text).
    pub ignore_columns: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            target_column: "los".to_string(),
            id_column: "id".to_string(),
            ignore_columns: Vec::new(),
        }
    }
}

/// Where length of stay was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LosSource {
    Column(String),
    AdmitDischarge,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: dataset + how LoS was obtained + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub los_source: LosSource,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load an admissions CSV from disk.
pub fn load_admissions(path: &Path, options: &IngestOptions) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = read_admissions(file, options)?;

    tracing::info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.rows_used,
        row_errors = ingested.row_errors.len(),
        "loaded admissions"
    );
    Ok(ingested)
}

/// Parse an admissions CSV from any reader.
pub fn read_admissions<R: Read>(input: R, options: &IngestOptions) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let target = normalize_header_name(&options.target_column);
    let id_column = normalize_header_name(&options.id_column);
    let los_source = resolve_los_source(&target, &header_map)?;

    let mut excluded: Vec<String> = vec![id_column.clone(), ADMIT_COLUMN.to_string(), DISCHARGE_COLUMN.to_string()];
    excluded.push(target.clone());
    excluded.extend(options.ignore_columns.iter().map(|c| normalize_header_name(c)));

    let feature_columns: Vec<(String, usize)> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .filter(|(name, _)| !excluded.contains(name))
        .collect();

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: one header line, and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = get_optional(&record, &header_map, &id_column)
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{line}"));

        match parse_row(&record, &header_map, &los_source, &feature_columns) {
            Ok((length_of_stay, features)) => observations.push(Observation {
                id,
                length_of_stay,
                features,
            }),
            Err(message) => row_errors.push(RowError {
                line,
                id: Some(id),
                message,
            }),
        }
    }

    for err in row_errors.iter().take(5) {
        tracing::warn!(line = err.line, id = ?err.id, "{}", err.message);
    }

    let rows_used = observations.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows remain after ingest."));
    }

    let names = feature_columns.into_iter().map(|(name, _)| name).collect();
    let dataset = Dataset::from_observations(names, &observations)?;

    Ok(IngestedData {
        dataset,
        los_source,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_los_source(target: &str, header_map: &HashMap<String, usize>) -> Result<LosSource, AppError> {
    if header_map.contains_key(target) {
        return Ok(LosSource::Column(target.to_string()));
    }
    if header_map.contains_key(ADMIT_COLUMN) && header_map.contains_key(DISCHARGE_COLUMN) {
        return Ok(LosSource::AdmitDischarge);
    }
    Err(AppError::new(
        2,
        format!("Missing length-of-stay column `{target}` (or both `{ADMIT_COLUMN}` and `{DISCHARGE_COLUMN}`)."),
    ))
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    los_source: &LosSource,
    feature_columns: &[(String, usize)],
) -> Result<(f64, Vec<f64>), String> {
    let los = match los_source {
        LosSource::Column(name) => {
            let raw = get_required(record, header_map, name)?;
            parse_f64(raw).ok_or_else(|| format!("Invalid `{name}` value '{raw}'."))?
        }
        LosSource::AdmitDischarge => {
            let admit = parse_datetime(get_required(record, header_map, ADMIT_COLUMN)?)?;
            let discharge = parse_datetime(get_required(record, header_map, DISCHARGE_COLUMN)?)?;
            (discharge - admit).num_seconds() as f64 / SECONDS_PER_DAY
        }
    };
    if los < 0.0 {
        return Err(format!("Negative length of stay ({los:.3} days)."));
    }

    let mut features = Vec::with_capacity(feature_columns.len());
    for (name, idx) in feature_columns {
        let raw = record
            .get(*idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("Missing value: `{name}`"))?;
        let value = parse_feature(raw).ok_or_else(|| format!("Non-numeric `{name}` value '{raw}'."))?;
        features.push(value);
    }

    Ok((los, features))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_feature(s: &str) -> Option<f64> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" => Some(1.0),
        "false" | "no" | "n" => Some(0.0),
        _ => parse_f64(s),
    }
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    const FMTS: [&str; 4] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%d/%m/%Y %H:%M"];
    for fmt in FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    // Date-only values are taken as midnight.
    if let Some(dt) = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(dt);
    }
    Err(format!(
        "Invalid timestamp '{s}'. Expected YYYY-MM-DD[ HH:MM[:SS]], YYYY-MM-DDTHH:MM:SS or DD/MM/YYYY HH:MM."
    ))
}
