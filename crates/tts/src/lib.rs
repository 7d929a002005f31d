#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod engine;
mod error;
mod handle;
mod output;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};

pub use engine::{SynthesisEngine, SynthesisJob};
pub use error::{Result, TtsError};
pub use handle::{EngineHandle, EngineStatus};
pub use request::JsonPayload;
pub use server::{Server, TtsServerBuilder};
pub use types::{SpeechResponse, SynthesisRequest, WAV_CONTENT_TYPE};

/// Build the speech server from configuration
///
/// Performs the one-time engine initialization.
pub async fn build_server(config: &educalm_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = TtsServerBuilder::new(&config.engine)
        .build()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech server: {e}"))?;

    Ok(Arc::new(server))
}

/// Create the endpoint router for speech synthesis
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/generate-audio", post(generate_audio))
}

/// Handle speech synthesis requests
async fn generate_audio(
    State(server): State<Arc<Server>>,
    JsonPayload(request): JsonPayload<SynthesisRequest>,
) -> Result<SpeechResponse> {
    tracing::debug!(
        "generate-audio called: language={}, text_len={}",
        request.language,
        request.text.len()
    );

    server.synthesize(request).await
}
