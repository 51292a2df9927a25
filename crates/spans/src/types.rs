use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// === Error types ===

/// Errors that can occur while loading span records.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid span on line {line}: {source}")]
    InvalidSpan {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

// === Identifiers ===

/// Identifies a span within a trace. Both ids are lowercase hex strings
/// (32 characters for the trace id, 16 for the span id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanContext {
    pub trace_id: String,
    pub span_id: String,
}

// === Enums ===

/// The OpenInference classification of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpanKind {
    Llm,
    Chain,
    Tool,
    Retriever,
    Embedding,
    Agent,
    Reranker,
    Evaluator,
    Guardrail,
    #[default]
    Unknown,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Llm => "LLM",
            SpanKind::Chain => "CHAIN",
            SpanKind::Tool => "TOOL",
            SpanKind::Retriever => "RETRIEVER",
            SpanKind::Embedding => "EMBEDDING",
            SpanKind::Agent => "AGENT",
            SpanKind::Reranker => "RERANKER",
            SpanKind::Evaluator => "EVALUATOR",
            SpanKind::Guardrail => "GUARDRAIL",
            SpanKind::Unknown => "UNKNOWN",
        }
    }
}

/// Final status of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpanStatusCode {
    #[default]
    Unset,
    Ok,
    Error,
}

// === Records ===

/// A time-stamped annotation recorded during a span, e.g. an exception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanEvent {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// One recorded unit of traced work.
///
/// Attributes are kept in their nested form (`{"llm": {"model_name": ...}}`);
/// flattening to dotted keys happens when the span is encoded for the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub name: String,
    pub context: SpanContext,
    #[serde(default)]
    pub span_kind: SpanKind,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status_code: SpanStatusCode,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub events: Vec<SpanEvent>,
}

impl SpanRecord {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
