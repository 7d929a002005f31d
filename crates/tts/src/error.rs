use axum::{
    Json,
    response::{IntoResponse, Response},
};
use educalm_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Errors surfaced by the speech endpoint
///
/// Both kinds map to a server error; neither is retried.
#[derive(Debug, Error)]
pub enum TtsError {
    /// The engine handle was never initialized
    #[error("TTS Engine not initialized")]
    EngineUnavailable,

    /// The engine was invoked and failed; carries the engine's message
    #[error("{0}")]
    SynthesisFailure(String),
}

impl TtsError {
    pub(crate) fn synthesis(message: impl Into<String>) -> Self {
        Self::SynthesisFailure(message.into())
    }
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EngineUnavailable | Self::SynthesisFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
