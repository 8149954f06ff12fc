//! Error types for configuration checks and event file decoding.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problems with the command line inputs, reported before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no input directories given")]
    NoInputs,

    #[error("input directory does not exist: {}", .0.display())]
    Missing(PathBuf),

    #[error("input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("smoothing coefficient must be in [0, 1), got {0}")]
    InvalidSmoothing(f64),

    #[error("{name} must be at least 1")]
    Zero { name: &'static str },
}

/// Failures of the length-prefixed record framing.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("truncated record header ({got} of 12 bytes)")]
    TruncatedHeader { got: usize },

    #[error("truncated record payload (expected {expected} bytes, got {got})")]
    TruncatedPayload { expected: u64, got: usize },

    #[error("length checksum mismatch (stored {stored:#010x}, computed {computed:#010x})")]
    LengthChecksum { stored: u32, computed: u32 },

    #[error("payload checksum mismatch (stored {stored:#010x}, computed {computed:#010x})")]
    PayloadChecksum { stored: u32, computed: u32 },

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// A per-file decode failure. Never fatal to the run.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{}: cannot open: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: record {index}: {source}", .path.display())]
    Record {
        path: PathBuf,
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("{}: record {index}: malformed event: {source}", .path.display())]
    Event {
        path: PathBuf,
        index: usize,
        #[source]
        source: prost::DecodeError,
    },
}

impl DecodeError {
    /// The file the failure belongs to.
    pub fn path(&self) -> &Path {
        match self {
            DecodeError::Open { path, .. }
            | DecodeError::Record { path, .. }
            | DecodeError::Event { path, .. } => path.as_path(),
        }
    }
}
