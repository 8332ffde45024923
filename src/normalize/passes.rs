//! Field normalizer passes.
//!
//! Six independent, total passes over the merged record sequence. Each
//! consumes its input and produces a fresh sequence; bad input turns into
//! an absent field, never an error. Trim and numeric coercion run before
//! the vocabulary mappings and timestamp canonicalization.

use crate::normalize::timeparse;
use crate::normalize::types::RawReading;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

/// Lower-cased unit alias -> canonical unit token.
///
/// The lookup key is always lower-cased first, so only lower-cased aliases
/// are stored; an unmatched label passes through with its original casing.
static UNIT_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("celsius", "degC"),
        ("°c", "degC"),
        ("c", "degC"),
        ("degc", "degC"),
        ("fahrenheit", "degF"),
        ("f", "degF"),
        ("degf", "degF"),
        ("°f", "degF"),
        ("pounds per square inch", "PSI_gauge"),
        ("psi", "PSI_gauge"),
        ("kilopascal", "kPa_gauge"),
        ("kpa", "kPa_gauge"),
        ("volt", "V"),
        ("volts", "V"),
        ("v", "V"),
        ("ohm", "Ω"),
        ("ohms", "Ω"),
        ("ω", "Ω"),
    ])
});

/// Lower-cased kind alias -> canonical quantity kind.
static KIND_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("temp", "temperature"),
        ("temperature", "temperature"),
        ("pressure", "pressure"),
        ("voltage", "voltage"),
        ("resistance", "resistance"),
    ])
});

fn map_label(label: String, table: &HashMap<&'static str, &'static str>) -> String {
    match table.get(label.to_lowercase().as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => label,
    }
}

/// Strip surrounding whitespace from the three string fields.
pub fn trim_strings(readings: Vec<RawReading>) -> Vec<RawReading> {
    readings
        .into_iter()
        .map(|mut r| {
            r.artifact_id = r.artifact_id.map(|s| s.trim().to_string());
            r.sdc_kind = r.sdc_kind.map(|s| s.trim().to_string());
            r.unit_label = r.unit_label.map(|s| s.trim().to_string());
            r
        })
        .collect()
}

fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    // A literal "NaN" parses as f64 but is not a usable measurement.
    parsed.filter(|v| v.is_finite())
}

/// Coerce `value` to a real number; anything unparsable becomes absent.
pub fn coerce_numeric(readings: Vec<RawReading>) -> Vec<RawReading> {
    readings
        .into_iter()
        .map(|mut r| {
            r.value = r
                .value
                .as_ref()
                .and_then(parse_number)
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number);
            r
        })
        .collect()
}

/// Canonicalize timestamps to ISO-8601 UTC with a trailing `Z`.
/// Blank or unparsable timestamps become absent.
pub fn canonicalize_timestamps(readings: Vec<RawReading>) -> Vec<RawReading> {
    readings
        .into_iter()
        .map(|mut r| {
            r.timestamp = r.timestamp.as_deref().and_then(timeparse::canonical_utc);
            r
        })
        .collect()
}

/// Map unit labels onto canonical unit tokens.
pub fn map_units(readings: Vec<RawReading>) -> Vec<RawReading> {
    readings
        .into_iter()
        .map(|mut r| {
            r.unit_label = r.unit_label.map(|label| map_label(label, &UNIT_MAP));
            r
        })
        .collect()
}

/// Map quantity-kind labels onto the canonical kind vocabulary.
pub fn map_kinds(readings: Vec<RawReading>) -> Vec<RawReading> {
    readings
        .into_iter()
        .map(|mut r| {
            r.sdc_kind = r.sdc_kind.map(|kind| map_label(kind, &KIND_MAP));
            r
        })
        .collect()
}

/// Canonicalize artifact ids: every space becomes a hyphen.
pub fn canonicalize_artifact_ids(readings: Vec<RawReading>) -> Vec<RawReading> {
    readings
        .into_iter()
        .map(|mut r| {
            r.artifact_id = r.artifact_id.map(|id| id.replace(' ', "-"));
            r
        })
        .collect()
}
