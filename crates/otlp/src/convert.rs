//! Conversion from Phoenix span records to OpenTelemetry protobuf types.

use chrono::{DateTime, Utc};
use phoenix_spans::{SpanEvent, SpanRecord, SpanStatusCode};
use serde_json::{Map, Value};

use crate::proto::common::{any_value, AnyValue, ArrayValue, KeyValue};
use crate::proto::trace::{self, span, status};

/// Attribute carrying the OpenInference span kind.
pub const SPAN_KIND_KEY: &str = "openinference.span.kind";

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid {field} {value:?}: {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("invalid {field} {value:?}: expected {expected} bytes, got {actual}")]
    IdLength {
        field: &'static str,
        value: String,
        expected: usize,
        actual: usize,
    },
}

// ============================================================
// Public API
// ============================================================

/// Convert one span record into an OTel span.
pub fn convert_span(record: &SpanRecord) -> Result<trace::Span, ConvertError> {
    let trace_id = decode_id("trace_id", &record.context.trace_id, 16)?;
    let span_id = decode_id("span_id", &record.context.span_id, 8)?;
    let parent_span_id = match &record.parent_id {
        Some(id) => decode_id("parent_id", id, 8)?,
        None => Vec::new(),
    };

    let mut attributes = flatten_attributes(&record.attributes);
    attributes.retain(|kv| kv.key != SPAN_KIND_KEY);
    attributes.push(str_attr(SPAN_KIND_KEY, record.span_kind.as_str()));

    Ok(trace::Span {
        trace_id,
        span_id,
        trace_state: String::new(),
        parent_span_id,
        name: record.name.clone(),
        kind: span::SpanKind::Internal as i32,
        start_time_unix_nano: datetime_to_nanos(&record.start_time),
        end_time_unix_nano: record.end_time.as_ref().map(datetime_to_nanos).unwrap_or(0),
        attributes,
        dropped_attributes_count: 0,
        events: record.events.iter().map(convert_event).collect(),
        dropped_events_count: 0,
        status: Some(convert_status(record.status_code, &record.status_message)),
    })
}

/// Flatten nested attributes into dotted OTel keys.
///
/// Objects recurse with their key as the next segment. Lists of objects recurse
/// with the element index as the segment (`llm.input_messages.0.message.role`).
/// Any other list becomes an array value. Nulls are dropped.
pub fn flatten_attributes(attributes: &Map<String, Value>) -> Vec<KeyValue> {
    let mut out = Vec::new();
    for (key, value) in attributes {
        flatten_into(key.clone(), value, &mut out);
    }
    out
}

/// Nanoseconds since the Unix epoch, clamped at zero.
pub fn datetime_to_nanos(dt: &DateTime<Utc>) -> u64 {
    match dt.timestamp_nanos_opt() {
        Some(nanos) if nanos > 0 => nanos as u64,
        _ => 0,
    }
}

// ============================================================
// Helpers
// ============================================================

fn decode_id(field: &'static str, value: &str, expected: usize) -> Result<Vec<u8>, ConvertError> {
    let bytes = hex::decode(value).map_err(|source| ConvertError::InvalidId {
        field,
        value: value.to_string(),
        source,
    })?;
    if bytes.len() != expected {
        return Err(ConvertError::IdLength {
            field,
            value: value.to_string(),
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

fn flatten_into(prefix: String, value: &Value, out: &mut Vec<KeyValue>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(format!("{prefix}.{key}"), value, out);
            }
        }
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            for (idx, item) in items.iter().enumerate() {
                flatten_into(format!("{prefix}.{idx}"), item, out);
            }
        }
        other => {
            if let Some(value) = to_any_value(other) {
                out.push(KeyValue {
                    key: prefix,
                    value: Some(value),
                });
            }
        }
    }
}

fn to_any_value(value: &Value) -> Option<AnyValue> {
    let value = match value {
        Value::Null | Value::Object(_) => return None,
        Value::Bool(b) => any_value::Value::BoolValue(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => any_value::Value::IntValue(i),
            None => any_value::Value::DoubleValue(n.as_f64()?),
        },
        Value::String(s) => any_value::Value::StringValue(s.clone()),
        Value::Array(items) => any_value::Value::ArrayValue(ArrayValue {
            values: items.iter().filter_map(to_any_value).collect(),
        }),
    };
    Some(AnyValue { value: Some(value) })
}

fn str_attr(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(any_value::Value::StringValue(value.to_string())),
        }),
    }
}

fn convert_event(event: &SpanEvent) -> span::Event {
    span::Event {
        time_unix_nano: datetime_to_nanos(&event.timestamp),
        name: event.name.clone(),
        attributes: flatten_attributes(&event.attributes),
        dropped_attributes_count: 0,
    }
}

fn convert_status(code: SpanStatusCode, message: &str) -> trace::Status {
    let code = match code {
        SpanStatusCode::Unset => status::StatusCode::Unset,
        SpanStatusCode::Ok => status::StatusCode::Ok,
        SpanStatusCode::Error => status::StatusCode::Error,
    };
    trace::Status {
        code: code as i32,
        message: message.to_string(),
    }
}
