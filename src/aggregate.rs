//! Parallel decoding of all event files and merging by run directory.

use crate::events::{decode_file, find_event_files, RunLog};
use crate::label::normalize_dir;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Every run's merged metrics, keyed by normalized directory, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    runs: Vec<(String, RunLog)>,
}

impl AggregateResult {
    /// Build from already merged runs. Later duplicates of a directory are
    /// merged into its first occurrence.
    pub fn from_runs<I>(runs: I) -> Self
    where
        I: IntoIterator<Item = (String, RunLog)>,
    {
        let mut result = Self::default();
        for (dir, log) in runs {
            match result.runs.iter().position(|(d, _)| *d == dir) {
                Some(i) => result.runs[i].1.merge(log),
                None => result.runs.push((dir, log)),
            }
        }
        result
    }

    pub fn runs(&self) -> impl Iterator<Item = (&str, &RunLog)> {
        self.runs.iter().map(|(dir, log)| (dir.as_str(), log))
    }

    pub fn get(&self, dir: &str) -> Option<&RunLog> {
        self.runs.iter().find(|(d, _)| d == dir).map(|(_, log)| log)
    }

    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.runs.iter().map(|(dir, _)| dir.as_str())
    }

    /// Distinct metric names over all runs, sorted.
    pub fn metric_names(&self) -> BTreeSet<&str> {
        self.runs
            .iter()
            .flat_map(|(_, log)| log.metric_names())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Worker count for the decode pool when none is configured.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Locate, decode and merge the event files of every directory in `dirs`.
///
/// Decoding runs on a dedicated pool of `jobs` threads that lives only for
/// the decode phase. A file that fails to decode is logged and contributes
/// whatever was read before the failure. A directory without event files
/// appears with an empty `RunLog`.
pub fn aggregate<P: AsRef<Path>>(dirs: &[P], jobs: usize) -> Result<AggregateResult> {
    // Keys are lossy display strings; walking uses the path as given.
    let mut runs: Vec<(String, PathBuf)> = Vec::new();
    for dir in dirs {
        let dir = dir.as_ref();
        let key = normalize_dir(&dir.to_string_lossy());
        if !runs.iter().any(|(k, _)| *k == key) {
            runs.push((key, dir.to_path_buf()));
        }
    }

    let mut tasks: Vec<(usize, PathBuf)> = Vec::new();
    for (index, (key, dir)) in runs.iter().enumerate() {
        let files = find_event_files(dir);
        if files.is_empty() {
            warn!(run = %key, "no event files found");
        } else {
            debug!(run = %key, files = files.len(), "located event files");
        }
        tasks.extend(files.into_iter().map(|file| (index, file)));
    }

    let started = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .thread_name(|i| format!("decode-{i}"))
        .build()
        .context("Failed to start decode worker pool")?;
    let decoded: Vec<_> = pool.install(|| {
        tasks
            .par_iter()
            .map(|(index, path)| (*index, decode_file(path)))
            .collect()
    });
    drop(pool);
    info!(
        files = tasks.len(),
        workers = jobs.max(1),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "decoded event files"
    );

    let mut runs: Vec<(String, RunLog)> = runs.into_iter().map(|(k, _)| (k, RunLog::new())).collect();
    for (index, outcome) in decoded {
        let (metrics, error) = outcome.into_parts();
        if let Some(error) = error {
            warn!(file = %error.path().display(), "{error}");
        }
        runs[index].1.absorb(metrics);
    }

    Ok(AggregateResult { runs })
}
