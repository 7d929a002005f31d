use std::time::Duration;

use async_trait::async_trait;
use educalm_config::HttpEngineConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{SynthesisEngine, SynthesisJob};
use crate::error::TtsError;

/// Time allowed for the startup reachability probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Engine reached through a running engine server
///
/// Speaks the `tts-server` API: `POST /api/tts` with a form body of `text`,
/// `language_id` and, when a reference voice is configured, `speaker_wav`,
/// answered with the waveform bytes. The text goes in the body so long
/// requests never run into URL length limits.
///
/// Stock Coqui `tts-server` ignores `speaker_wav`; voice cloning needs a
/// server that reads it.
pub struct HttpEngine {
    client: Client,
    endpoint: Url,
    api_key: Option<SecretString>,
}

impl HttpEngine {
    /// Build the client and check that the server answers
    ///
    /// Any HTTP status counts as reachable; only transport failures make
    /// the engine unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or the server cannot
    /// be reached
    pub async fn connect(config: &HttpEngineConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build engine HTTP client: {e}"))?;

        let endpoint = config
            .base_url
            .join("api/tts")
            .map_err(|e| anyhow::anyhow!("invalid engine base URL {}: {e}", config.base_url))?;

        let probe = client
            .get(config.base_url.clone())
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("engine server at {} is not reachable: {e}", config.base_url))?;

        tracing::debug!(status = %probe.status(), "engine server answered probe at {}", config.base_url);

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl SynthesisEngine for HttpEngine {
    async fn synthesize(&self, job: &SynthesisJob<'_>) -> crate::error::Result<()> {
        tracing::debug!(
            "engine server request: language={}, text_len={}",
            job.language,
            job.text.len(),
        );

        let mut form = vec![("text", job.text.to_string()), ("language_id", job.language.to_string())];
        if let Some(speaker_wav) = job.speaker_wav {
            form.push(("speaker_wav", speaker_wav.to_string_lossy().into_owned()));
        }

        let mut request = self.client.post(self.endpoint.clone()).form(&form);
        if let Some(ref api_key) = self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("engine server request failed: {e}");
            TtsError::synthesis(format!("failed to reach engine server: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("engine server error ({status}): {error_text}");

            return Err(TtsError::synthesis(format!("engine server returned {status}: {error_text}")));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("failed to read engine server response: {e}");
            TtsError::synthesis(format!("failed to read engine response: {e}"))
        })?;

        tokio::fs::write(job.output_path, &audio)
            .await
            .map_err(|e| TtsError::synthesis(format!("failed to write generated audio: {e}")))?;

        tracing::debug!("engine server synthesis complete, {} bytes", audio.len());

        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
