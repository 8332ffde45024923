//! Pipeline assembly: adapters -> merge -> normalizer passes -> filter ->
//! sort -> sink.
//!
//! Single-threaded and batch-shaped: every stage fully materializes its
//! output before the next stage runs, and a fatal source error aborts the
//! run before anything is written.

use crate::normalize::types::{RawReading, Reading, RunSummary};
use crate::normalize::{json, passes, tabular, writer};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Input and output locations for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Delimited source A.
    pub input_a: PathBuf,
    /// JSON or NDJSON source B.
    pub input_b: PathBuf,
    /// Delimited source C.
    pub input_c: PathBuf,
    /// Normalized CSV artifact.
    pub output: PathBuf,
}

/// Concatenate per-source batches in fixed priority order. No dedup, no
/// reordering within a batch; this order is the final sort's tie-break.
pub fn merge(batches: Vec<Vec<RawReading>>) -> Vec<RawReading> {
    batches.into_iter().flatten().collect()
}

/// Run the six normalizer passes over the merged sequence.
///
/// Trim and numeric coercion come first; the vocabulary mappings key on
/// already lower-cased, trimmed labels.
pub fn normalize_fields(readings: Vec<RawReading>) -> Vec<RawReading> {
    let readings = passes::trim_strings(readings);
    let readings = passes::coerce_numeric(readings);
    let readings = passes::canonicalize_timestamps(readings);
    let readings = passes::map_units(readings);
    let readings = passes::map_kinds(readings);
    passes::canonicalize_artifact_ids(readings)
}

/// Drop records missing any canonical field.
pub fn filter_complete(readings: Vec<RawReading>) -> Vec<Reading> {
    readings
        .into_iter()
        .filter_map(RawReading::into_complete)
        .collect()
}

/// Sort by `(artifact_id, timestamp)`, byte ordering on both keys. The
/// sort is stable, so merge input order breaks ties.
pub fn sort_rows(mut rows: Vec<Reading>) -> Vec<Reading> {
    rows.sort_by(|a, b| {
        a.artifact_id
            .cmp(&b.artifact_id)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });
    rows
}

/// Run the whole pipeline: read all three sources, normalize, filter,
/// sort, and write the output artifact. Returns per-source and output row
/// counts for diagnostics.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let batch_a = tabular::read_tabular(&config.input_a)
        .with_context(|| format!("Failed to read source A from {}", config.input_a.display()))?;
    let batch_b = json::read_json(&config.input_b)
        .with_context(|| format!("Failed to read source B from {}", config.input_b.display()))?;
    let batch_c = tabular::read_tabular(&config.input_c)
        .with_context(|| format!("Failed to read source C from {}", config.input_c.display()))?;

    let summary_inputs = (batch_a.len(), batch_b.len(), batch_c.len());

    let merged = merge(vec![batch_a, batch_b, batch_c]);
    let normalized = normalize_fields(merged);
    let rows = sort_rows(filter_complete(normalized));

    writer::write_readings(&config.output, &rows)
        .with_context(|| format!("Failed to write output to {}", config.output.display()))?;

    Ok(RunSummary {
        rows_a: summary_inputs.0,
        rows_b: summary_inputs.1,
        rows_c: summary_inputs.2,
        rows_written: rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const CSV_HEADER: &str = "Device Name,Reading Type,Units,Reading Value,Time (Local)";

    fn setup(dir: &TempDir, a: &str, b: &str, c: &str) -> PipelineConfig {
        let input_a = dir.path().join("sensor_A.csv");
        let input_b = dir.path().join("sensor_B.json");
        let input_c = dir.path().join("sensor_C.csv");
        fs::write(&input_a, a).unwrap();
        fs::write(&input_b, b).unwrap();
        fs::write(&input_c, c).unwrap();
        PipelineConfig {
            input_a,
            input_b,
            input_c,
            output: dir.path().join("out/readings_normalized.csv"),
        }
    }

    #[test]
    fn end_to_end_normalizes_all_sources() {
        let dir = TempDir::new().unwrap();
        let config = setup(
            &dir,
            &format!("{CSV_HEADER}\nSensor 1,Temp,F,71.6,2024-01-15 10:30:00\n"),
            r#"{"readings": [{"entity_id": "Sensor 2", "data": [
                {"kind": "pressure", "unit": "kPa", "value": 101.3, "time": "2024-01-15T09:00:00+01:00"},
                {"kind": "pressure", "unit": "kPa", "value": 101.4, "time": "2024-01-15T10:00:00+01:00"}
            ]}]}"#,
            &format!("{CSV_HEADER}\nSensor 3,voltage,v,12.1,2024-01-15 08:00:00\n"),
        );

        let summary = run(&config).unwrap();
        assert_eq!(summary.rows_a, 1);
        assert_eq!(summary.rows_b, 2);
        assert_eq!(summary.rows_c, 1);
        assert_eq!(summary.rows_written, 4);

        let content = fs::read_to_string(&config.output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "artifact_id,sdc_kind,unit_label,value,timestamp");
        assert_eq!(lines[1], "Sensor-1,temperature,degF,71.6,2024-01-15T10:30:00Z");
        assert_eq!(lines[2], "Sensor-2,pressure,kPa_gauge,101.3,2024-01-15T08:00:00Z");
        assert_eq!(lines[3], "Sensor-2,pressure,kPa_gauge,101.4,2024-01-15T09:00:00Z");
        assert_eq!(lines[4], "Sensor-3,voltage,V,12.1,2024-01-15T08:00:00Z");
    }

    #[test]
    fn output_is_byte_identical_across_runs() {
        let dir = TempDir::new().unwrap();
        let config = setup(
            &dir,
            &format!("{CSV_HEADER}\nSensor 1,Temp,F,71.6,2024-01-15 10:30:00\n"),
            r#"[{"artifact": "Sensor 1", "kind": "temp", "uom": "C", "val": 22.0, "ts": "2024-01-14"}]"#,
            &format!("{CSV_HEADER}\nSensor 1,Temp,C,21.0,2024-01-13\n"),
        );

        run(&config).unwrap();
        let first = fs::read(&config.output).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn incomplete_records_are_dropped() {
        let dir = TempDir::new().unwrap();
        let config = setup(
            &dir,
            &format!(
                "{CSV_HEADER}\n\
                 Sensor 1,Temp,F,abc,2024-01-15 10:30:00\n\
                 Sensor 2,Temp,F,70.1,   \n\
                 Sensor 3,Temp,F,NA,2024-01-15 10:30:00\n\
                 Sensor 4,Temp,F,70.2,2024-01-15 10:30:00\n"
            ),
            r#"[{"artifact": "Sensor 5", "kind": "temp", "uom": "F"}]"#,
            &format!("{CSV_HEADER}\n"),
        );

        let summary = run(&config).unwrap();
        assert_eq!(summary.rows_a, 4);
        assert_eq!(summary.rows_written, 1);

        let content = fs::read_to_string(&config.output).unwrap();
        assert!(content.contains("Sensor-4"));
        assert!(!content.contains("abc"));
        assert!(!content.contains("Sensor-1"));
    }

    #[test]
    fn merge_order_breaks_sort_ties() {
        let dir = TempDir::new().unwrap();
        // Identical (artifact_id, timestamp) in all three sources; units
        // differ so the rows are distinguishable in the output.
        let config = setup(
            &dir,
            &format!("{CSV_HEADER}\nSensor 1,voltage,volt,1.0,2024-01-15 10:30:00\n"),
            r#"[{"artifact": "Sensor 1", "kind": "voltage", "uom": "mV", "val": 2.0, "ts": "2024-01-15 10:30:00"}]"#,
            &format!("{CSV_HEADER}\nSensor 1,voltage,kV,3.0,2024-01-15 10:30:00\n"),
        );

        run(&config).unwrap();
        let content = fs::read_to_string(&config.output).unwrap();
        let units: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(2).unwrap())
            .collect();
        assert_eq!(units, ["V", "mV", "kV"]);
    }

    #[test]
    fn unreadable_source_aborts_before_writing() {
        let dir = TempDir::new().unwrap();
        let mut config = setup(
            &dir,
            &format!("{CSV_HEADER}\nSensor 1,Temp,F,71.6,2024-01-15 10:30:00\n"),
            r#"[]"#,
            &format!("{CSV_HEADER}\n"),
        );
        config.input_b = dir.path().join("missing.json");

        assert!(run(&config).is_err());
        assert!(!config.output.exists());
    }

    #[test]
    fn sorting_is_bytewise_on_both_keys() {
        let readings = vec![
            Reading {
                artifact_id: "Sensor-10".to_string(),
                sdc_kind: "temperature".to_string(),
                unit_label: "degC".to_string(),
                value: 1.0,
                timestamp: "2024-01-15T10:30:00Z".to_string(),
            },
            Reading {
                artifact_id: "Sensor-2".to_string(),
                sdc_kind: "temperature".to_string(),
                unit_label: "degC".to_string(),
                value: 2.0,
                timestamp: "2024-01-15T10:30:00Z".to_string(),
            },
        ];
        let sorted = sort_rows(readings);
        // Byte ordering: "Sensor-10" < "Sensor-2".
        assert_eq!(sorted[0].artifact_id, "Sensor-10");
        assert_eq!(sorted[1].artifact_id, "Sensor-2");
    }

    #[test]
    fn merge_preserves_relative_input_order() {
        let a = vec![RawReading {
            artifact_id: Some("a1".to_string()),
            ..RawReading::default()
        }];
        let b = vec![RawReading {
            artifact_id: Some("b1".to_string()),
            ..RawReading::default()
        }];
        let merged = merge(vec![a, b]);
        assert_eq!(merged[0].artifact_id.as_deref(), Some("a1"));
        assert_eq!(merged[1].artifact_id.as_deref(), Some("b1"));
    }

    #[test]
    fn normalize_fields_composes_all_passes() {
        let raw = RawReading {
            artifact_id: Some(" Sensor 7 ".to_string()),
            sdc_kind: Some("Temp".to_string()),
            unit_label: Some(" kPa ".to_string()),
            value: Some(json!("101.3")),
            timestamp: Some("2024-01-15 10:30:00".to_string()),
        };
        let rows = filter_complete(normalize_fields(vec![raw]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].artifact_id, "Sensor-7");
        assert_eq!(rows[0].sdc_kind, "temperature");
        assert_eq!(rows[0].unit_label, "kPa_gauge");
        assert_eq!(rows[0].value, 101.3);
        assert_eq!(rows[0].timestamp, "2024-01-15T10:30:00Z");
    }
}
