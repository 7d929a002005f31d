use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. Keeps the mapping from
/// error to status code next to the error, while the rendering stays in one
/// place ([`ErrorBody`]).
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// JSON body for this error
    fn body(&self) -> ErrorBody {
        ErrorBody::new(self.client_message())
    }
}

/// Error body returned by every endpoint: `{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}
