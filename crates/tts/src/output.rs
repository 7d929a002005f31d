use std::path::Path;

use tempfile::TempPath;

use crate::error::{Result, TtsError};

/// Per-request destination file for the engine
///
/// Each request gets its own uniquely named file so concurrent requests
/// never observe each other's audio. The file is deleted when this value
/// is dropped, on success and failure alike.
#[derive(Debug)]
pub struct OutputFile {
    path: TempPath,
}

impl OutputFile {
    /// Reserve a fresh `.wav` path inside `dir`
    pub fn create(dir: &Path) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("speech-")
            .suffix(".wav")
            .tempfile_in(dir)
            .map_err(|e| TtsError::synthesis(format!("failed to create output file in {}: {e}", dir.display())))?;

        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read what the engine wrote
    ///
    /// An engine that reports success without producing audio is a failure.
    pub async fn read(&self) -> Result<Vec<u8>> {
        let audio = tokio::fs::read(self.path())
            .await
            .map_err(|e| TtsError::synthesis(format!("failed to read generated audio: {e}")))?;

        if audio.is_empty() {
            return Err(TtsError::synthesis("engine produced no audio"));
        }

        Ok(audio)
    }
}
