//! Decoding of a single event file into per-metric series.

use super::proto::parse_event;
use super::record::RecordReader;
use super::{FileLog, Sample};
use crate::error::DecodeError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Result of decoding one file. A failure keeps whatever was read before it.
#[derive(Debug)]
pub enum DecodeOutcome {
    Complete(FileLog),
    Partial { metrics: FileLog, error: DecodeError },
}

impl DecodeOutcome {
    pub fn metrics(&self) -> &FileLog {
        match self {
            DecodeOutcome::Complete(metrics) | DecodeOutcome::Partial { metrics, .. } => metrics,
        }
    }

    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            DecodeOutcome::Complete(_) => None,
            DecodeOutcome::Partial { error, .. } => Some(error),
        }
    }

    pub fn into_parts(self) -> (FileLog, Option<DecodeError>) {
        match self {
            DecodeOutcome::Complete(metrics) => (metrics, None),
            DecodeOutcome::Partial { metrics, error } => (metrics, Some(error)),
        }
    }
}

/// Read every scalar sample from the event file at `path`.
///
/// Never fails outright: open, framing and payload errors are returned inside
/// `DecodeOutcome::Partial` together with the samples decoded so far.
pub fn decode_file(path: &Path) -> DecodeOutcome {
    let mut metrics = FileLog::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            let error = DecodeError::Open {
                path: path.to_path_buf(),
                source,
            };
            return DecodeOutcome::Partial { metrics, error };
        }
    };

    for (index, record) in RecordReader::new(BufReader::new(file)).enumerate() {
        let payload = match record {
            Ok(payload) => payload,
            Err(source) => {
                let error = DecodeError::Record {
                    path: path.to_path_buf(),
                    index,
                    source,
                };
                return DecodeOutcome::Partial { metrics, error };
            }
        };

        let event = match parse_event(&payload) {
            Ok(event) => event,
            Err(source) => {
                let error = DecodeError::Event {
                    path: path.to_path_buf(),
                    index,
                    source,
                };
                return DecodeOutcome::Partial { metrics, error };
            }
        };

        for scalar in event.scalars {
            metrics.entry(scalar.tag).or_default().push(Sample {
                wall_time: event.wall_time,
                step: event.step,
                value: scalar.value,
            });
        }
    }

    DecodeOutcome::Complete(metrics)
}
