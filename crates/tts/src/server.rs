use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use educalm_config::EngineConfig;
use educalm_telemetry::SynthesisMetrics;

use crate::{
    engine::{SynthesisEngine, SynthesisJob},
    error::{Result, TtsError},
    handle::{EngineHandle, EngineStatus},
    output::OutputFile,
    types::{SpeechResponse, SynthesisRequest},
};

/// Speech service state shared by every request
#[derive(Debug)]
pub struct Server {
    handle: EngineHandle,
    speaker_wav: Option<PathBuf>,
    output_dir: PathBuf,
    timeout: Duration,
    metrics: SynthesisMetrics,
}

impl Server {
    /// Synthesize the request text into a WAV response
    ///
    /// Checks the engine handle first, then runs the engine against a fresh
    /// output file. The file is removed before this returns.
    pub async fn synthesize(&self, request: SynthesisRequest) -> Result<SpeechResponse> {
        let engine = self.handle.engine()?;

        let start = Instant::now();
        let result = self.run(engine, &request).await;

        self.metrics.record_result(&request.language, &result, start);

        match &result {
            Ok(audio) => tracing::debug!(
                "synthesis complete: language={}, {} bytes in {:?}",
                request.language,
                audio.len(),
                start.elapsed()
            ),
            Err(e) => tracing::warn!("synthesis failed: language={}: {e}", request.language),
        }

        result.map(SpeechResponse::wav)
    }

    async fn run(&self, engine: &dyn SynthesisEngine, request: &SynthesisRequest) -> Result<Vec<u8>> {
        let output = OutputFile::create(&self.output_dir)?;

        let job = SynthesisJob {
            text: &request.text,
            language: &request.language,
            speaker_wav: self.speaker_wav.as_deref(),
            output_path: output.path(),
        };

        tokio::time::timeout(self.timeout, engine.synthesize(&job))
            .await
            .map_err(|_| TtsError::synthesis(format!("synthesis timed out after {:?}", self.timeout)))??;

        output.read().await
    }

    pub const fn engine_status(&self) -> EngineStatus {
        self.handle.status()
    }
}

/// Builder for constructing the speech server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a EngineConfig,
    handle: Option<EngineHandle>,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config, handle: None }
    }

    /// Use an already constructed handle instead of initializing the
    /// configured engine
    pub fn with_handle(mut self, handle: EngineHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Initialize the engine handle (once) and assemble the server
    ///
    /// An unavailable engine is not an error here.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is invalid or the output directory
    /// cannot be created
    pub async fn build(self) -> anyhow::Result<Server> {
        let timeout = self.config.timeout_duration()?;

        let output_dir = self.config.output_dir();
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| anyhow::anyhow!("failed to create output directory {}: {e}", output_dir.display()))?;

        let handle = match self.handle {
            Some(handle) => handle,
            None => EngineHandle::initialize(self.config).await,
        };

        if let Some(ref speaker_wav) = self.config.speaker_wav
            && !speaker_wav.is_file()
        {
            tracing::warn!("reference voice {} does not exist", speaker_wav.display());
        }

        Ok(Server {
            handle,
            speaker_wav: self.config.speaker_wav.clone(),
            output_dir,
            timeout,
            metrics: SynthesisMetrics::new(),
        })
    }
}

