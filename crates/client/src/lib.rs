//! Synchronous client for the Phoenix observability server.
//!
//! [`Client`] queries spans and evaluations, uploads evaluations and exports
//! traces. Tabular payloads travel as Arrow IPC streams; traces travel as
//! gzipped OTLP protobuf, one span per request.
//!
//! A client built without an explicit endpoint may find a [`LocalSession`]
//! registered in this process, in which case every call is answered by that
//! session instead of the network.
//!
//! # Usage
//!
//! ```no_run
//! use phoenix_client::{Client, QueryOptions, SpanQuery};
//!
//! let client = Client::builder().endpoint("http://localhost:6006").build()?;
//! let query: SpanQuery = r#"{"filter": {"condition": "span_kind == 'LLM'"}}"#.parse().unwrap();
//! match client.query_spans([query], &QueryOptions::default())? {
//!     Some(result) => println!("{} table(s)", result.into_tables().len()),
//!     None => println!("no spans"),
//! }
//! # Ok::<(), phoenix_client::ClientError>(())
//! ```

mod client;
pub mod codec;
pub mod config;
pub mod decode;
mod error;
pub mod evals;
pub mod query;
pub mod request;
pub mod session;
pub mod status;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use decode::SpanQueryResult;
pub use error::ClientError;
pub use evals::{EvaluationKind, Evaluations};
pub use query::{QueryOptions, SpanQuery, TimeRange};
pub use session::{active_session, set_active_session, LocalSession};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

pub use phoenix_spans::{SpanRecord, TraceDataset};
