//! Sensor-reading normalization pipeline.
//!
//! Heterogeneous sources flow through a fixed sequence of stages:
//! format adapters -> schema unification -> merge -> field normalizer
//! passes -> filter/sort -> CSV sink. Each stage consumes the previous
//! stage's full output; nothing loops back.

pub mod types;
pub mod resolver;
pub mod tabular;
pub mod json;
pub mod timeparse;
pub mod passes;
pub mod pipeline;
pub mod writer;

pub use types::{RawReading, Reading, RunSummary, SourceError};
pub use pipeline::{filter_complete, merge, normalize_fields, run, sort_rows, PipelineConfig};
