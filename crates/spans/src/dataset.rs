use std::io::BufRead;

use crate::types::{ParseError, SpanRecord};

/// An ordered collection of spans, typically loaded from a span export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceDataset {
    pub name: String,
    spans: Vec<SpanRecord>,
}

impl TraceDataset {
    pub fn new(name: impl Into<String>, spans: Vec<SpanRecord>) -> Self {
        TraceDataset {
            name: name.into(),
            spans,
        }
    }

    /// Read a dataset from JSON lines, one span per line. Blank lines are skipped.
    pub fn from_json_lines(
        name: impl Into<String>,
        reader: impl BufRead,
    ) -> Result<Self, ParseError> {
        let mut spans = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let span = serde_json::from_str(&line).map_err(|source| ParseError::InvalidSpan {
                line: idx + 1,
                source,
            })?;
            spans.push(span);
        }
        Ok(Self::new(name, spans))
    }

    /// The spans in insertion order.
    pub fn to_spans(&self) -> impl Iterator<Item = &SpanRecord> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
