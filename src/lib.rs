//! # Kiln - Sensor Reading Normalization
//!
//! A batch pipeline that ingests sensor-reading records from three
//! independently formatted sources (two delimited CSV files, one JSON or
//! NDJSON file), unifies their schemas into a canonical five-field shape,
//! normalizes strings, numbers, timestamps, and unit/kind vocabularies,
//! then writes one sorted, deterministic CSV artifact.
//!
//! ## Canonical schema
//!
//! Every record is reduced to `artifact_id`, `sdc_kind`, `unit_label`,
//! `value`, and `timestamp`. Records missing any field after normalization
//! are dropped; survivors are sorted by `(artifact_id, timestamp)` with
//! source priority (A, B, C) breaking ties.
//!
//! ## Quick Start
//!
//! ```rust
//! use kiln::normalize::{self, RawReading};
//! use serde_json::json;
//!
//! let raw = RawReading {
//!     artifact_id: Some("Sensor 7".to_string()),
//!     sdc_kind: Some("Temp".to_string()),
//!     unit_label: Some("F".to_string()),
//!     value: Some(json!("71.6")),
//!     timestamp: Some("2024-01-15 10:30:00".to_string()),
//! };
//!
//! let rows = normalize::sort_rows(normalize::filter_complete(
//!     normalize::normalize_fields(vec![raw]),
//! ));
//!
//! assert_eq!(rows[0].artifact_id, "Sensor-7");
//! assert_eq!(rows[0].sdc_kind, "temperature");
//! assert_eq!(rows[0].unit_label, "degF");
//! assert_eq!(rows[0].timestamp, "2024-01-15T10:30:00Z");
//! ```
//!
//! File-backed runs go through [`normalize::run`] with a
//! [`normalize::PipelineConfig`] naming the three inputs and the output
//! artifact.

pub mod normalize;

// Re-export the main surface for convenience
pub use normalize::{PipelineConfig, RawReading, Reading, RunSummary, SourceError};
