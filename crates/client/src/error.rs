use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::evals::EvaluationsError;
use crate::request::RequestError;
use crate::transport::TransportError;

/// Errors returned by [`Client`](crate::Client) operations.
///
/// A 404 from the server is never an error: query operations report it as an
/// absent or empty result instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the query (422). Carries the server's diagnostic verbatim.
    #[error("{0}")]
    InvalidQuery(String),

    #[error("server returned error status {status}: {body}")]
    HttpStatus {
        status: http::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Evaluations(#[from] EvaluationsError),

    #[error("failed to export span: {0}")]
    Export(#[from] phoenix_otlp::ExportError),

    #[error("invalid client configuration: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Whether the request failed in transit or with an unsuccessful status.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ClientError::HttpStatus { .. } | ClientError::Transport(_))
    }
}
