//! Write a small set of demo runs to plot.
//!
//! Creates `run-seed0`, `run-seed1` and `run-seed2` under the output
//! directory, each logging metric `foo` twice, one second apart:
//!
//! ```text
//! cargo run --example gen_logs -- demo-logs
//! cargo run -- demo-logs/run-seed*
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use scalarplot::events::EventWriter;
use std::fs;
use std::path::PathBuf;

/// Generate demo event logs
#[derive(Parser, Debug)]
struct Args {
    /// Directory that receives one sub-directory per run
    #[arg(default_value = "logs")]
    out: PathBuf,

    /// Number of runs to create
    #[arg(short, long, default_value = "3")]
    runs: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let start = Utc::now().timestamp_millis() as f64 / 1000.0;

    for i in 0..args.runs {
        let dir = args.out.join(format!("run-seed{i}"));
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

        let mut writer = EventWriter::in_dir(&dir, start, "localhost")
            .with_context(|| format!("Failed to create event file in {}", dir.display()))?;
        writer.add_scalar("foo", 0.0, 0, start)?;
        writer.add_scalar("foo", 1.0 + i as f64 / 3.0, 1, start + 1.0)?;
        writer.flush()?;

        eprintln!("Wrote {}", writer.path().display());
    }

    Ok(())
}
