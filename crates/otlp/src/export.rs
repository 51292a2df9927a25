//! Builds the per-span export message sent to `POST /v1/traces`.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use phoenix_spans::SpanRecord;
use prost::Message;

use crate::convert::{self, ConvertError};
use crate::proto::collector::ExportTraceServiceRequest;
use crate::proto::common::{any_value, AnyValue, KeyValue};
use crate::proto::resource::Resource;
use crate::proto::trace::{ResourceSpans, ScopeSpans, Span};

/// Resource attribute naming the project a span belongs to.
pub const PROJECT_NAME_KEY: &str = "openinference.project.name";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to convert span: {0}")]
    Convert(#[from] ConvertError),

    #[error("gzip failed: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("failed to decode export request: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Wrap one span as resource → scope → span, with the resource naming `project_name`.
pub fn export_request(project_name: &str, span: Span) -> ExportTraceServiceRequest {
    ExportTraceServiceRequest {
        resource_spans: vec![ResourceSpans {
            resource: Some(Resource {
                attributes: vec![KeyValue {
                    key: PROJECT_NAME_KEY.to_string(),
                    value: Some(AnyValue {
                        value: Some(any_value::Value::StringValue(project_name.to_string())),
                    }),
                }],
                dropped_attributes_count: 0,
            }),
            scope_spans: vec![ScopeSpans {
                scope: None,
                spans: vec![span],
                schema_url: String::new(),
            }],
            schema_url: String::new(),
        }],
    }
}

/// Serialize an export request and gzip it.
pub fn encode_gzip(request: &ExportTraceServiceRequest) -> Result<Vec<u8>, ExportError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&request.encode_to_vec())?;
    Ok(encoder.finish()?)
}

/// Inverse of [`encode_gzip`].
pub fn decode_gzip(data: &[u8]) -> Result<ExportTraceServiceRequest, ExportError> {
    let mut decoder = GzDecoder::new(data);
    let mut raw = Vec::new();
    decoder.read_to_end(&mut raw)?;
    Ok(ExportTraceServiceRequest::decode(&raw[..])?)
}

/// Convert, wrap and compress a single span record.
pub fn encode_span(project_name: &str, record: &SpanRecord) -> Result<Vec<u8>, ExportError> {
    let span = convert::convert_span(record)?;
    encode_gzip(&export_request(project_name, span))
}
