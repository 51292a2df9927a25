//! Converts Phoenix span records to OpenTelemetry protobuf format.
//!
//! Each span is exported on its own: [`export::export_request`] wraps it in a
//! resource naming the project and a bare instrumentation scope, and
//! [`export::encode_gzip`] produces the body for `POST /v1/traces`.
//!
//! # Usage
//!
//! ```no_run
//! # fn load() -> phoenix_spans::SpanRecord { unimplemented!() }
//! let record = load();
//! let body = phoenix_otlp::encode_span("default", &record).unwrap();
//! // send `body` with `content-type: application/x-protobuf` and `content-encoding: gzip`
//! ```

pub mod convert;
pub mod export;
pub mod proto;

pub use convert::{convert_span, ConvertError};
pub use export::{encode_span, ExportError};
