use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A loosely typed reading as produced by a format adapter.
///
/// All five canonical fields are optional: a source may omit a column
/// entirely, and the normalizer passes turn unparseable values into `None`
/// rather than failing. `value` stays a raw [`Value`] until the numeric
/// coercion pass replaces it with a JSON number (or absence).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReading {
    pub artifact_id: Option<String>,
    pub sdc_kind: Option<String>,
    pub unit_label: Option<String>,
    pub value: Option<Value>,
    pub timestamp: Option<String>,
}

impl RawReading {
    /// Convert into a complete output row, or `None` if any canonical field
    /// is absent or empty.
    ///
    /// Expects the normalizer passes to have run already: `value` must hold
    /// a JSON number and `timestamp` a canonical UTC string.
    pub fn into_complete(self) -> Option<Reading> {
        let value = self.value.as_ref().and_then(Value::as_f64)?;
        let artifact_id = self.artifact_id.filter(|s| !s.is_empty())?;
        let sdc_kind = self.sdc_kind.filter(|s| !s.is_empty())?;
        let unit_label = self.unit_label.filter(|s| !s.is_empty())?;
        let timestamp = self.timestamp.filter(|s| !s.is_empty())?;
        Some(Reading {
            artifact_id,
            sdc_kind,
            unit_label,
            value,
            timestamp,
        })
    }
}

/// A complete, normalized reading - one row in the output table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub artifact_id: String,
    pub sdc_kind: String,
    pub unit_label: String,
    pub value: f64,
    /// ISO-8601 UTC, always ending in `Z`.
    pub timestamp: String,
}

/// Row counts reported after a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_a: usize,
    pub rows_b: usize,
    pub rows_c: usize,
    pub rows_written: usize,
}

/// A whole-source failure. Per-record problems never surface here; they
/// become absent fields and are dropped by the filter stage.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON document rejected: {0}")]
    Document(#[from] simd_json::Error),
}
