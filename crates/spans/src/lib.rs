//! Span records as exported by Phoenix.
//!
//! A [`SpanRecord`] is one unit of traced work with its attributes, timing and
//! parent linkage. A [`TraceDataset`] is an ordered collection of them, read
//! from JSON lines.
//!
//! # Usage
//!
//! ```no_run
//! use phoenix_spans::TraceDataset;
//!
//! let file = std::fs::File::open("spans.jsonl").unwrap();
//! let dataset = TraceDataset::from_json_lines("my-traces", std::io::BufReader::new(file)).unwrap();
//! for span in dataset.to_spans() {
//!     println!("{} {}", span.context.span_id, span.name);
//! }
//! ```

mod dataset;
pub mod types;

pub use dataset::TraceDataset;
pub use types::{ParseError, SpanContext, SpanEvent, SpanKind, SpanRecord, SpanStatusCode};
