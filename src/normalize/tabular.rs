//! Delimited-text adapters (sources A and C).
//!
//! Both tabular sources share one header dialect: cells are strings, and the
//! tokens `""`, `"NA"`, and `"NaN"` mean the cell is absent. Headers are
//! renamed onto the canonical schema; columns outside it are dropped, and
//! canonical columns missing from the file are simply absent downstream.

use crate::normalize::types::{RawReading, SourceError};
use serde_json::Value;
use std::path::Path;

/// Source header -> canonical field.
const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Device Name", "artifact_id"),
    ("Reading Type", "sdc_kind"),
    ("Units", "unit_label"),
    ("Reading Value", "value"),
    ("Time (Local)", "timestamp"),
];

/// Cell tokens treated as absent rather than as literal strings.
const ABSENT_TOKENS: &[&str] = &["", "NA", "NaN"];

fn canonical_column(header: &str) -> Option<&'static str> {
    COLUMN_RENAMES
        .iter()
        .find(|(source, _)| *source == header)
        .map(|(_, canonical)| *canonical)
}

/// Read one delimited source into raw readings.
///
/// A missing file or a malformed row is fatal for the whole source; cell
/// level oddities are not.
pub fn read_tabular(path: &Path) -> Result<Vec<RawReading>, SourceError> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns: Vec<Option<&'static str>> = reader
        .headers()?
        .iter()
        .map(canonical_column)
        .collect();

    let mut readings = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut reading = RawReading::default();
        for (index, cell) in record.iter().enumerate() {
            let Some(field) = columns.get(index).copied().flatten() else {
                continue;
            };
            if ABSENT_TOKENS.contains(&cell) {
                continue;
            }
            match field {
                "artifact_id" => reading.artifact_id = Some(cell.to_string()),
                "sdc_kind" => reading.sdc_kind = Some(cell.to_string()),
                "unit_label" => reading.unit_label = Some(cell.to_string()),
                "value" => reading.value = Some(Value::String(cell.to_string())),
                "timestamp" => reading.timestamp = Some(cell.to_string()),
                _ => {}
            }
        }
        readings.push(reading);
    }
    Ok(readings)
}
