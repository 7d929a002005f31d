use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use tts::EngineStatus;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    engine: EngineStatus,
}

/// Health check handler
///
/// Always answers 200; a degraded engine shows up in the body only.
pub async fn health_handler(State(server): State<Arc<tts::Server>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        engine: server.engine_status(),
    })
}
