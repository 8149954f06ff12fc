//! Scalarplot - plot scalar metrics from TensorBoard event logs.
//!
//! Every metric found in the given run directories gets its own subplot,
//! with one raw and one smoothed curve per run.

use anyhow::{Context, Result};
use clap::Parser;
use scalarplot::aggregate::{self, default_jobs};
use scalarplot::config::{parse_smoothing, validate_input_dirs, PlotConfig, XAxis};
use scalarplot::label::default_output_path;
use scalarplot::{logging, plot};
use std::path::PathBuf;
use tracing::info;

/// Compare scalar metrics logged by several training runs
#[derive(Parser, Debug)]
#[command(name = "scalarplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run directories to search for event files
    #[arg(required = true)]
    dirs: Vec<PathBuf>,

    /// Horizontal axis of every subplot
    #[arg(short = 'x', long, value_enum, default_value_t = XAxis::Time)]
    x_axis: XAxis,

    /// Subplots per row
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
    columns: u32,

    /// Exponential smoothing coefficient, 0 <= alpha < 1
    #[arg(short, long, default_value = "0.6", value_parser = parse_smoothing)]
    smoothing: f64,

    /// Output image (.png, .svg, ...). Derived from the run names if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output resolution
    #[arg(long, default_value = "70", value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,

    /// Decode worker threads (default: available parallelism)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let dirs = validate_input_dirs(&args.dirs)?;
    let config = PlotConfig {
        x_axis: args.x_axis,
        columns: args.columns as usize,
        smoothing: args.smoothing,
        dpi: args.dpi,
    };
    config.validate()?;

    let jobs = args.jobs.unwrap_or_else(default_jobs);
    let result = aggregate::aggregate(&dirs, jobs).context("Failed to load event logs")?;
    logging::log_run_summaries(&result);

    let figure = plot::build_figure(&result, &config)?;

    let output = args.output.unwrap_or_else(|| {
        let names: Vec<&str> = result.dirs().collect();
        default_output_path(&names)
    });
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    plot::render(&figure, &output, config.dpi)
        .with_context(|| format!("Failed to render {}", output.display()))?;
    info!(
        panels = figure.panels.len(),
        runs = figure.legend.len(),
        "wrote {}",
        output.display()
    );
    eprintln!("Saved plot to: {}", output.display());

    Ok(())
}
