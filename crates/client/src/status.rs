//! Maps HTTP outcomes onto [`ClientError`].

use bytes::Bytes;
use http::StatusCode;

use crate::error::ClientError;
use crate::transport::HttpResponse;

/// Outcome of a query or fetch that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Found(Bytes),
    NotFound,
}

/// Classify the response to a query or fetch.
///
/// 404 means nothing matched and is not an error. 422 carries the server's
/// diagnostic for a malformed query.
pub fn classify_query(response: HttpResponse) -> Result<QueryOutcome, ClientError> {
    match response.status {
        StatusCode::NOT_FOUND => Ok(QueryOutcome::NotFound),
        StatusCode::UNPROCESSABLE_ENTITY => Err(ClientError::InvalidQuery(response.text())),
        status if status.is_success() => Ok(QueryOutcome::Found(response.body)),
        status => Err(ClientError::HttpStatus {
            status,
            body: response.text(),
        }),
    }
}

/// Require a successful status, as for uploads.
pub fn ensure_success(response: HttpResponse) -> Result<(), ClientError> {
    if response.status.is_success() {
        Ok(())
    } else {
        Err(ClientError::HttpStatus {
            status: response.status,
            body: response.text(),
        })
    }
}
