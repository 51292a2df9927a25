#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use arrow_array::{Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use http::StatusCode;
use phoenix_client::request::VERSION_PATH;
use phoenix_client::transport::{HttpRequest, HttpResponse, Transport, TransportError};

type Responder = dyn Fn(&HttpRequest) -> HttpResponse + Send + Sync;

/// Records every request and answers with `responder`.
///
/// Liveness checks are answered with `probe_status` and recorded separately.
#[derive(Clone)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    probes: Arc<Mutex<Vec<HttpRequest>>>,
    probe_status: u16,
    responder: Arc<Responder>,
}

impl MockTransport {
    pub fn new(responder: impl Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static) -> Self {
        MockTransport {
            requests: Arc::default(),
            probes: Arc::default(),
            probe_status: 200,
            responder: Arc::new(responder),
        }
    }

    pub fn status(status: u16, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self::new(move |_| response(status, body.clone()))
    }

    pub fn with_probe_status(mut self, status: u16) -> Self {
        self.probe_status = status;
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn probes(&self) -> Vec<HttpRequest> {
        self.probes.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if request.url.path() == VERSION_PATH {
            self.probes.lock().unwrap().push(request);
            return Ok(response(self.probe_status, Bytes::from_static(b"4.0.0")));
        }
        let resp = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        Ok(resp)
    }
}

/// A transport whose every call fails, for asserting the network is never used.
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Other(format!("unexpected request to {}", request.url)))
    }
}

pub fn response(status: u16, body: impl Into<Bytes>) -> HttpResponse {
    HttpResponse {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.into(),
    }
}

pub fn spans_table(names: &[&str]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("latency_ms", DataType::Int64, false),
    ]));
    let latencies: Vec<i64> = (0..names.len() as i64).map(|i| i * 10).collect();
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(names.to_vec())),
            Arc::new(Int64Array::from(latencies)),
        ],
    )
    .unwrap()
}

pub fn blank_table() -> RecordBatch {
    RecordBatch::new_empty(Arc::new(Schema::empty()))
}

/// Lay out one IPC stream per table, back to back.
pub fn stream_body(tables: &[RecordBatch]) -> Bytes {
    let mut body = Vec::new();
    for table in tables {
        body.extend(phoenix_client::codec::encode_table(table).unwrap());
    }
    Bytes::from(body)
}
