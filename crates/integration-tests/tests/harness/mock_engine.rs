//! Mock engine server for integration tests
//!
//! Implements the `tts-server` endpoint: `POST /api/tts` with a form body of
//! `text`, `language_id` and optional `speaker_wav`, answered with
//! a fake waveform that echoes the inputs.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// One synthesis call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub text: String,
    pub language: String,
    pub speaker_wav: Option<String>,
}

enum Behavior {
    Echo,
    Fail(String),
    Silent,
    Slow(Duration),
}

struct MockEngineState {
    behavior: Behavior,
    calls: Mutex<Vec<RecordedCall>>,
}

/// Mock engine server that returns predictable audio
pub struct MockEngine {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockEngineState>,
}

impl MockEngine {
    /// Start a mock that answers every request with `RIFF` + language + text
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Echo).await
    }

    /// Start a mock that fails every request with 500 and `message`
    pub async fn start_failing(message: &str) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Fail(message.to_owned())).await
    }

    /// Start a mock that answers with an empty body
    pub async fn start_silent() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Silent).await
    }

    /// Start a mock that waits `delay` before answering
    pub async fn start_slow(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Slow(delay)).await
    }

    async fn start_inner(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockEngineState {
            behavior,
            calls: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", routing::get(|| async { "mock engine" }))
            .route("/api/tts", routing::post(handle_tts))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the engine server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Calls received so far, in arrival order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Audio the echoing mock produces for a call
pub fn fake_audio(language: &str, text: &str) -> Vec<u8> {
    format!("RIFF{language}:{text}").into_bytes()
}

#[derive(Debug, Deserialize)]
struct TtsForm {
    text: String,
    language_id: String,
    speaker_wav: Option<String>,
}

async fn handle_tts(State(state): State<Arc<MockEngineState>>, Form(form): Form<TtsForm>) -> Response {
    state.calls.lock().unwrap().push(RecordedCall {
        text: form.text.clone(),
        language: form.language_id.clone(),
        speaker_wav: form.speaker_wav.clone(),
    });

    match &state.behavior {
        Behavior::Echo => fake_audio(&form.language_id, &form.text).into_response(),
        Behavior::Fail(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()).into_response(),
        Behavior::Silent => StatusCode::OK.into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(*delay).await;
            fake_audio(&form.language_id, &form.text).into_response()
        }
    }
}
