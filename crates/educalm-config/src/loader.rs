use std::path::Path;

use crate::{AllowList, Config, EngineBackend};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_engine_config()?;
        self.validate_server_config()?;
        Ok(())
    }

    fn validate_engine_config(&self) -> anyhow::Result<()> {
        let timeout = self.engine.timeout_duration()?;
        if timeout.is_zero() {
            anyhow::bail!("engine.timeout must be greater than zero");
        }

        match &self.engine.backend {
            EngineBackend::Command(command) => {
                if command.program.trim().is_empty() {
                    anyhow::bail!("engine.backend.program must not be empty");
                }
            }
            EngineBackend::Http(http) => {
                if !matches!(http.base_url.scheme(), "http" | "https") {
                    anyhow::bail!(
                        "engine.backend.base_url must use http or https, got '{}'",
                        http.base_url.scheme()
                    );
                }
            }
        }

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        if let Some(ref cors) = self.server.cors
            && let AllowList::Only(methods) = &cors.methods
        {
            for method in methods {
                method
                    .parse::<http::Method>()
                    .map_err(|e| anyhow::anyhow!("invalid CORS method '{method}': {e}"))?;
            }
        }

        Ok(())
    }
}
