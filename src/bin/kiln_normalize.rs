//! kiln-normalize: merge heterogeneous sensor-reading sources into one
//! normalized CSV.
//!
//! Usage:
//!   # Defaults match the conventional data layout
//!   kiln-normalize
//!
//!   # Explicit paths
//!   kiln-normalize --input-a a.csv --input-b b.json --input-c c.csv \
//!       --output normalized.csv

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use kiln::normalize::{run, PipelineConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kiln-normalize")]
#[command(about = "Normalize heterogeneous sensor readings into one CSV", long_about = None)]
struct Args {
    /// Delimited source A
    #[arg(long, default_value = "data/sensor_A.csv")]
    input_a: PathBuf,

    /// JSON or NDJSON source B
    #[arg(long, default_value = "data/sensor_B.json")]
    input_b: PathBuf,

    /// Delimited source C
    #[arg(long, default_value = "data/sensor_C.csv")]
    input_c: PathBuf,

    /// Normalized output CSV
    #[arg(long, short = 'o', default_value = "data/readings_normalized.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = PipelineConfig {
        input_a: args.input_a,
        input_b: args.input_b,
        input_c: args.input_c,
        output: args.output.clone(),
    };

    let summary = run(&config)?;

    println!("[kiln-normalize] Input A rows: {}", summary.rows_a);
    println!("[kiln-normalize] Input B rows: {}", summary.rows_b);
    println!("[kiln-normalize] Input C rows: {}", summary.rows_c);
    println!(
        "[kiln-normalize] Wrote {} with {} rows.",
        args.output.display(),
        summary.rows_written
    );

    Ok(())
}
