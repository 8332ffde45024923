use crate::normalize::types::Reading;
use anyhow::{Context, Result};
use std::path::Path;

/// Output column order, matching the canonical schema.
const HEADER: [&str; 5] = ["artifact_id", "sdc_kind", "unit_label", "value", "timestamp"];

/// Write the final ordered rows to a UTF-8 CSV artifact.
///
/// Creates any missing parent directory. The header row is written even
/// when no rows survived the filter stage.
pub fn write_readings(path: &Path, rows: &[Reading]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    writer.write_record(HEADER).context("Failed to write header")?;
    for row in rows {
        let value = row.value.to_string();
        writer
            .write_record([
                row.artifact_id.as_str(),
                row.sdc_kind.as_str(),
                row.unit_label.as_str(),
                value.as_str(),
                row.timestamp.as_str(),
            ])
            .context("Failed to write row")?;
    }
    writer.flush().context("Failed to flush output")?;
    Ok(())
}
