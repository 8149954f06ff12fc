//! Protobuf messages stored in event files, reduced to the fields needed to
//! extract scalar summaries. Unknown fields are skipped by prost.

use prost::Message;

// DataType enum values
pub const DT_FLOAT: i32 = 1;
pub const DT_DOUBLE: i32 = 2;
pub const DT_INT32: i32 = 3;
pub const DT_INT64: i32 = 9;

/// One record of an event file.
#[derive(Clone, PartialEq, Message)]
pub struct Event {
    #[prost(double, tag = "1")]
    pub wall_time: f64,
    #[prost(int64, tag = "2")]
    pub step: i64,
    #[prost(string, optional, tag = "3")]
    pub file_version: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub summary: Option<Summary>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Summary {
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<SummaryValue>,
}

/// `Summary.Value`. Images, histograms and audio are left undecoded.
#[derive(Clone, PartialEq, Message)]
pub struct SummaryValue {
    #[prost(string, optional, tag = "1")]
    pub tag: Option<String>,
    #[prost(float, optional, tag = "2")]
    pub simple_value: Option<f32>,
    #[prost(message, optional, tag = "8")]
    pub tensor: Option<TensorProto>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TensorProto {
    #[prost(int32, tag = "1")]
    pub dtype: i32,
    #[prost(message, optional, tag = "2")]
    pub tensor_shape: Option<TensorShapeProto>,
    #[prost(bytes = "vec", tag = "4")]
    pub tensor_content: Vec<u8>,
    #[prost(float, repeated, tag = "5")]
    pub float_val: Vec<f32>,
    #[prost(double, repeated, tag = "6")]
    pub double_val: Vec<f64>,
    #[prost(int32, repeated, tag = "7")]
    pub int_val: Vec<i32>,
    #[prost(int64, repeated, tag = "10")]
    pub int64_val: Vec<i64>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TensorShapeProto {
    #[prost(message, repeated, tag = "2")]
    pub dim: Vec<TensorShapeDim>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TensorShapeDim {
    #[prost(int64, tag = "1")]
    pub size: i64,
}

/// One scalar reading carried by an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarValue {
    pub tag: String,
    pub value: f64,
}

/// The parts of an event this crate consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarEvent {
    pub wall_time: f64,
    pub step: i64,
    pub scalars: Vec<ScalarValue>,
}

/// Decode one record payload and keep its scalar values.
pub fn parse_event(buf: &[u8]) -> Result<ScalarEvent, prost::DecodeError> {
    let event = Event::decode(buf)?;
    let scalars = event
        .summary
        .map(|summary| summary.value.into_iter().filter_map(scalar_value).collect())
        .unwrap_or_default();
    Ok(ScalarEvent {
        wall_time: event.wall_time,
        step: event.step,
        scalars,
    })
}

/// `None` for values that are not scalars.
fn scalar_value(value: SummaryValue) -> Option<ScalarValue> {
    let tag = value.tag?;
    let scalar = match value.simple_value {
        Some(v) => f64::from(v),
        None => tensor_scalar(value.tensor.as_ref()?)?,
    };
    Some(ScalarValue { tag, value: scalar })
}

/// The single element of a numeric tensor, if it has exactly one.
fn tensor_scalar(tensor: &TensorProto) -> Option<f64> {
    let elements = tensor.tensor_shape.as_ref().map_or(1, |shape| {
        shape.dim.iter().fold(1i64, |n, d| n.saturating_mul(d.size))
    });
    if elements != 1 {
        return None;
    }
    if !tensor.tensor_content.is_empty() {
        return decode_content(tensor.dtype, &tensor.tensor_content);
    }

    let values: Vec<f64> = tensor
        .float_val
        .iter()
        .map(|&v| f64::from(v))
        .chain(tensor.double_val.iter().copied())
        .chain(tensor.int_val.iter().map(|&v| f64::from(v)))
        .chain(tensor.int64_val.iter().map(|&v| v as f64))
        .collect();
    match values.as_slice() {
        [value] => Some(*value),
        _ => None,
    }
}

fn decode_content(dtype: i32, content: &[u8]) -> Option<f64> {
    match dtype {
        DT_FLOAT => <[u8; 4]>::try_from(content)
            .ok()
            .map(|b| f64::from(f32::from_le_bytes(b))),
        DT_DOUBLE => <[u8; 8]>::try_from(content).ok().map(f64::from_le_bytes),
        DT_INT32 => <[u8; 4]>::try_from(content)
            .ok()
            .map(|b| f64::from(i32::from_le_bytes(b))),
        DT_INT64 => <[u8; 8]>::try_from(content)
            .ok()
            .map(|b| i64::from_le_bytes(b) as f64),
        _ => None,
    }
}
