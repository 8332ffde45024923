//! JSON / NDJSON adapter (source B).
//!
//! The payload is first parsed as a single JSON document; when that fails
//! the bytes are re-read as newline-delimited JSON, one record per
//! non-blank line. Inside a document the record sequence is resolved by
//! priority: a `readings` array is flattened per (entity, data-point)
//! pair, then a `records` array is used directly, then a top-level array,
//! then the lone object itself.

use crate::normalize::resolver::{as_text, resolve};
use crate::normalize::types::{RawReading, SourceError};
use serde_json::{json, Value};
use std::path::Path;

const ARTIFACT_ALIASES: &[&str] = &["artifact", "asset", "entity_id"];
const KIND_ALIASES: &[&str] = &["kind", "measure_type", "sdc_kind"];
const UNIT_ALIASES: &[&str] = &["uom", "unit", "unit_label"];
const VALUE_ALIASES: &[&str] = &["val", "reading", "value"];
const TIMESTAMP_ALIASES: &[&str] = &["ts", "time", "timestamp"];

/// Read the JSON source into raw readings.
pub fn read_json(path: &Path) -> Result<Vec<RawReading>, SourceError> {
    let raw = std::fs::read(path)?;
    let records = parse_payload(&raw)?;
    Ok(records.iter().map(record_from_value).collect())
}

/// Parse the payload into a flat record sequence.
///
/// The whole-document attempt goes through simd-json on a scratch copy of
/// the buffer (it parses in place). A document that fails outright falls
/// back to NDJSON, where any bad line is fatal.
fn parse_payload(raw: &[u8]) -> Result<Vec<Value>, SourceError> {
    let mut scratch = raw.to_vec();
    if let Ok(document) = simd_json::to_owned_value(&mut scratch) {
        let text = simd_json::to_string(&document)?;
        let value: Value = serde_json::from_str(&text)?;
        return Ok(resolve_records(value));
    }

    let text = String::from_utf8_lossy(raw);
    let mut records = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(serde_json::from_str(line)?);
    }
    Ok(records)
}

/// Apply the structural resolution priority to a parsed document.
fn resolve_records(document: Value) -> Vec<Value> {
    if let Some(entries) = document.get("readings").and_then(Value::as_array) {
        return flatten_readings(entries);
    }
    if let Some(records) = document.get("records").and_then(Value::as_array) {
        return records.clone();
    }
    match document {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Flatten a nested `readings` array: one record per (entity, data-point)
/// pair, under the short alias keys the flat records also use.
fn flatten_readings(entries: &[Value]) -> Vec<Value> {
    let mut records = Vec::new();
    for entry in entries {
        let entity = entry.get("entity_id").cloned().unwrap_or(Value::Null);
        let Some(points) = entry.get("data").and_then(Value::as_array) else {
            continue;
        };
        for point in points {
            records.push(json!({
                "artifact": entity.clone(),
                "kind": point.get("kind").cloned().unwrap_or(Value::Null),
                "uom": point.get("unit").cloned().unwrap_or(Value::Null),
                "val": point.get("value").cloned().unwrap_or(Value::Null),
                "ts": point.get("time").cloned().unwrap_or(Value::Null),
            }));
        }
    }
    records
}

/// Map one raw record onto the canonical shape via the alias lists.
/// Non-object records produce an all-absent reading, which the filter
/// stage later discards.
fn record_from_value(value: &Value) -> RawReading {
    let Some(obj) = value.as_object() else {
        return RawReading::default();
    };
    RawReading {
        artifact_id: resolve(obj, ARTIFACT_ALIASES).and_then(as_text),
        sdc_kind: resolve(obj, KIND_ALIASES).and_then(as_text),
        unit_label: resolve(obj, UNIT_ALIASES).and_then(as_text),
        value: resolve(obj, VALUE_ALIASES).cloned(),
        timestamp: resolve(obj, TIMESTAMP_ALIASES).and_then(as_text),
    }
}
