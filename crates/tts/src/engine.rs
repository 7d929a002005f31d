pub mod command;
pub mod http;

use std::path::Path;

use async_trait::async_trait;

/// Arguments of a single synthesis call
#[derive(Debug, Clone, Copy)]
pub struct SynthesisJob<'a> {
    /// Text to speak
    pub text: &'a str,
    /// Language code (e.g. "en", "fr", "ar")
    pub language: &'a str,
    /// Reference voice sample conditioning the output voice
    pub speaker_wav: Option<&'a Path>,
    /// File the engine must write the waveform to
    pub output_path: &'a Path,
}

/// External synthesis engine
///
/// Implementations populate `job.output_path` on success. Any failure is
/// reported as [`crate::TtsError::SynthesisFailure`] with the engine's own
/// message.
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Synthesize `job.text` into `job.output_path`
    async fn synthesize(&self, job: &SynthesisJob<'_>) -> crate::error::Result<()>;

    /// Short engine name for logs
    fn name(&self) -> &str;
}
