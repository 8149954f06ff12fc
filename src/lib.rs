//! Scalarplot - compare scalar metrics from multiple TensorBoard event logs.
//!
//! Event files under each run directory are decoded in parallel, merged per
//! run, smoothed and drawn as one composite figure with a subplot per metric.

pub mod aggregate;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod label;
pub mod logging;
pub mod plot;
pub mod smooth;
pub mod timeunit;

pub use aggregate::{aggregate, AggregateResult};
pub use config::{PlotConfig, XAxis};
pub use events::{RunLog, Sample, Series};
pub use plot::{build_figure, render, Figure};
