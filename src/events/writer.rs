//! Writing event files, used to produce fixtures and demo logs.

use super::proto::{Event, Summary, SummaryValue, TensorProto, TensorShapeProto, DT_DOUBLE};
use super::record::RecordWriter;
use prost::Message;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

const FILE_VERSION: &str = "brain.Event:2";

/// Appends scalar events to a new event file.
///
/// Records are buffered. Call [`EventWriter::flush`] before the writer is
/// dropped, otherwise buffered records are lost.
pub struct EventWriter {
    records: RecordWriter<BufWriter<File>>,
    path: PathBuf,
}

impl EventWriter {
    /// Create (or truncate) `path` and write the leading file-version record.
    pub fn create<P: AsRef<Path>>(path: P, wall_time: f64) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = Self {
            records: RecordWriter::new(BufWriter::new(file)),
            path,
        };

        let event = Event {
            wall_time,
            file_version: Some(FILE_VERSION.to_string()),
            ..Event::default()
        };
        writer.records.write_record(&event.encode_to_vec())?;
        Ok(writer)
    }

    /// Create a conventionally named event file inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P, wall_time: f64, host: &str) -> io::Result<Self> {
        let name = format!("events.out.tfevents.{}.{}", wall_time as i64, host);
        Self::create(dir.as_ref().join(name), wall_time)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Log `value` under `tag` as a single-precision simple value.
    pub fn add_scalar(&mut self, tag: &str, value: f64, step: i64, wall_time: f64) -> io::Result<()> {
        let value = SummaryValue {
            tag: Some(tag.to_string()),
            simple_value: Some(value as f32),
            tensor: None,
        };
        self.write_summary(value, step, wall_time)
    }

    /// Log `value` under `tag` as a rank-0 double tensor.
    pub fn add_tensor_scalar(
        &mut self,
        tag: &str,
        value: f64,
        step: i64,
        wall_time: f64,
    ) -> io::Result<()> {
        let tensor = TensorProto {
            dtype: DT_DOUBLE,
            tensor_shape: Some(TensorShapeProto::default()),
            tensor_content: value.to_le_bytes().to_vec(),
            ..TensorProto::default()
        };
        let value = SummaryValue {
            tag: Some(tag.to_string()),
            simple_value: None,
            tensor: Some(tensor),
        };
        self.write_summary(value, step, wall_time)
    }

    fn write_summary(&mut self, value: SummaryValue, step: i64, wall_time: f64) -> io::Result<()> {
        let event = Event {
            wall_time,
            step,
            file_version: None,
            summary: Some(Summary { value: vec![value] }),
        };
        self.records.write_record(&event.encode_to_vec())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.records.flush()
    }
}
