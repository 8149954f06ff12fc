//! Event log discovery, decoding and the per-run data model.

pub mod decode;
pub mod locate;
pub mod proto;
pub mod record;
pub mod writer;

pub use decode::{decode_file, DecodeOutcome};
pub use locate::find_event_files;
pub use writer::EventWriter;

use std::collections::BTreeMap;

/// One logged reading of a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the Unix epoch
    pub wall_time: f64,
    pub step: i64,
    pub value: f64,
}

/// Samples of one metric in storage order (not necessarily sorted).
pub type Series = Vec<Sample>;

/// Metric name to series, as decoded from a single file.
pub type FileLog = BTreeMap<String, Series>;

/// All metrics of one run directory, merged across its event files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLog {
    metrics: BTreeMap<String, Series>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every series of `file` onto the series of the same name.
    pub fn absorb(&mut self, file: FileLog) {
        for (name, samples) in file {
            if samples.is_empty() {
                continue;
            }
            self.metrics.entry(name).or_default().extend(samples);
        }
    }

    /// Append all of `other`'s series after this run's own.
    pub fn merge(&mut self, other: RunLog) {
        self.absorb(other.metrics);
    }

    pub fn get(&self, metric: &str) -> Option<&Series> {
        self.metrics.get(metric)
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.metrics.iter().map(|(name, series)| (name.as_str(), series))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.metrics.values().map(Vec::len).sum()
    }

    /// Earliest and latest wall-clock time across all metrics.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        self.metrics
            .values()
            .flatten()
            .map(|s| s.wall_time)
            .fold(None, |span, t| match span {
                None => Some((t, t)),
                Some((lo, hi)) => Some((f64::min(lo, t), f64::max(hi, t))),
            })
    }
}
