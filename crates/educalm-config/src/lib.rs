#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod engine;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use engine::*;
pub use health::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level service configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Synthesis engine configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
