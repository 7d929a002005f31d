use std::sync::Arc;

use educalm_config::{EngineBackend, EngineConfig};
use serde::Serialize;

use crate::{
    engine::{SynthesisEngine, command::CommandEngine, http::HttpEngine},
    error::{Result, TtsError},
};

/// Process-wide engine handle
///
/// Created once at startup and never changed afterwards. When the engine
/// cannot be set up the service keeps running and every synthesis request
/// fails with [`TtsError::EngineUnavailable`].
#[derive(Clone)]
pub enum EngineHandle {
    Ready(Arc<dyn SynthesisEngine>),
    Unavailable { reason: String },
}

/// Engine state as reported by the health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    Ready,
    Unavailable,
}

impl EngineHandle {
    /// Attempt engine initialization exactly once
    ///
    /// Never fails: an engine that cannot be reached yields
    /// [`EngineHandle::Unavailable`] and a warning.
    pub async fn initialize(config: &EngineConfig) -> Self {
        if !config.enabled {
            tracing::info!("synthesis engine disabled by configuration");
            return Self::unavailable("disabled by configuration");
        }

        let engine: anyhow::Result<Arc<dyn SynthesisEngine>> = match &config.backend {
            EngineBackend::Command(command) => {
                CommandEngine::new(command).map(|engine| Arc::new(engine) as Arc<dyn SynthesisEngine>)
            }
            EngineBackend::Http(http) => HttpEngine::connect(http)
                .await
                .map(|engine| Arc::new(engine) as Arc<dyn SynthesisEngine>),
        };

        match engine {
            Ok(engine) => {
                tracing::info!(engine = engine.name(), "synthesis engine loaded");
                Self::Ready(engine)
            }
            Err(e) => {
                tracing::warn!("synthesis engine unavailable, serving in degraded mode: {e:#}");
                Self::unavailable(format!("{e:#}"))
            }
        }
    }

    pub fn ready(engine: Arc<dyn SynthesisEngine>) -> Self {
        Self::Ready(engine)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    /// The engine, or [`TtsError::EngineUnavailable`]
    pub fn engine(&self) -> Result<&dyn SynthesisEngine> {
        match self {
            Self::Ready(engine) => Ok(engine.as_ref()),
            Self::Unavailable { .. } => Err(TtsError::EngineUnavailable),
        }
    }

    pub const fn status(&self) -> EngineStatus {
        match self {
            Self::Ready(_) => EngineStatus::Ready,
            Self::Unavailable { .. } => EngineStatus::Unavailable,
        }
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(engine) => f.debug_tuple("Ready").field(&engine.name()).finish(),
            Self::Unavailable { reason } => f.debug_struct("Unavailable").field("reason", reason).finish(),
        }
    }
}
