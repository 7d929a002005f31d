use std::{path::PathBuf, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Model loaded by the command engine when none is configured
pub const DEFAULT_MODEL: &str = "tts_models/multilingual/multi-dataset/xtts_v2";

/// Synthesis engine configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Whether to attempt engine initialization at startup
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// How the engine is reached
    #[serde(default)]
    pub backend: EngineBackend,
    /// Reference voice sample passed to every synthesis call
    #[serde(default)]
    pub speaker_wav: Option<PathBuf>,
    /// Directory receiving per-request output files (system temp dir when unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Upper bound on a single synthesis call (e.g. "90s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: EngineBackend::default(),
            speaker_wav: None,
            output_dir: None,
            timeout: default_timeout(),
        }
    }
}

impl EngineConfig {
    /// Parsed synthesis timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout` is not a valid duration string
    pub fn timeout_duration(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid engine timeout '{}': {e}", self.timeout))
    }

    /// Directory for per-request output files
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Engine transport
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineBackend {
    /// Spawn the engine command-line program per request
    Command(CommandEngineConfig),
    /// Call a running engine server over HTTP
    Http(HttpEngineConfig),
}

impl Default for EngineBackend {
    fn default() -> Self {
        Self::Command(CommandEngineConfig::default())
    }
}

/// Command-line engine (Coqui `tts` compatible)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandEngineConfig {
    /// Program name or path
    #[serde(default = "default_program")]
    pub program: String,
    /// Model identifier passed as `--model_name`
    #[serde(default = "default_model")]
    pub model: String,
    /// Compute device passed as `--device`
    #[serde(default = "default_device")]
    pub device: String,
    /// Extra arguments appended to every invocation
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for CommandEngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            model: default_model(),
            device: default_device(),
            args: Vec::new(),
        }
    }
}

/// Engine server (Coqui `tts-server` compatible)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpEngineConfig {
    /// Server base URL
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Bearer token for servers sitting behind an authenticating proxy
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_timeout() -> String {
    "120s".to_string()
}

fn default_program() -> String {
    "tts".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:5002").expect("must be a valid URL")
}
