use axum::response::{IntoResponse, Response};
use http::{HeaderValue, header};
use serde::Deserialize;

/// Content type of every generated file
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// Speech synthesis request body
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisRequest {
    /// Text to synthesize, forwarded to the engine unchanged
    pub text: String,
    /// Language code understood by the engine
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Raw audio returned to the caller
#[derive(Debug)]
pub struct SpeechResponse {
    /// Generated audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio
    pub content_type: &'static str,
}

impl SpeechResponse {
    pub const fn wav(audio: Vec<u8>) -> Self {
        Self {
            audio,
            content_type: WAV_CONTENT_TYPE,
        }
    }
}

impl IntoResponse for SpeechResponse {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type))],
            self.audio,
        )
            .into_response()
    }
}
