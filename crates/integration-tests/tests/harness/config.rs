//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use educalm_config::{
    Config, CorsConfig, EngineBackend, EngineConfig, HealthConfig, HttpEngineConfig, ServerConfig,
};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    ///
    /// The engine starts disabled; tests opt into a backend explicitly.
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                engine: EngineConfig {
                    enabled: false,
                    ..EngineConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Use an engine server pointed at a mock backend
    pub fn with_http_engine(mut self, base_url: &str) -> Self {
        self.config.engine.enabled = true;
        self.config.engine.backend = EngineBackend::Http(HttpEngineConfig {
            base_url: base_url.parse().expect("valid URL"),
            api_key: None,
        });
        self
    }

    /// Write generated audio into `dir` instead of the system temp directory
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.config.engine.output_dir = Some(dir.to_path_buf());
        self
    }

    /// Send a reference voice sample path with every request
    pub fn with_speaker_wav(mut self, path: &str) -> Self {
        self.config.engine.speaker_wav = Some(path.into());
        self
    }

    /// Bound every synthesis by `timeout` (e.g. "100ms")
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.config.engine.timeout = timeout.to_owned();
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
