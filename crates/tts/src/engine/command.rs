use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use async_trait::async_trait;
use educalm_config::CommandEngineConfig;
use tokio::process::Command;

use super::{SynthesisEngine, SynthesisJob};
use crate::error::TtsError;

/// Engine driven through its command-line program
///
/// The text travels in a single `--text=..` argument so that text starting
/// with `-` is never parsed as an option. Every call spawns one process:
/// `<program> [args..] --text=T --model_name M --language_idx L --device D --out_path O [--speaker_wav S]`
#[derive(Debug)]
pub struct CommandEngine {
    program: PathBuf,
    leading_args: Vec<String>,
    model: String,
    device: String,
}

impl CommandEngine {
    /// Resolve the configured program
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be found, which leaves the
    /// service in degraded mode
    pub fn new(config: &CommandEngineConfig) -> anyhow::Result<Self> {
        let program = resolve_program(&config.program)
            .ok_or_else(|| anyhow::anyhow!("engine program '{}' not found", config.program))?;

        tracing::debug!(program = %program.display(), model = %config.model, "resolved engine program");

        Ok(Self {
            program,
            leading_args: config.args.clone(),
            model: config.model.clone(),
            device: config.device.clone(),
        })
    }

    fn command(&self, job: &SynthesisJob<'_>) -> Command {
        let mut command = Command::new(&self.program);

        command
            .args(&self.leading_args)
            .arg(format!("--text={}", job.text))
            .arg("--model_name")
            .arg(&self.model)
            .arg("--language_idx")
            .arg(job.language)
            .arg("--device")
            .arg(&self.device)
            .arg("--out_path")
            .arg(job.output_path);

        if let Some(speaker_wav) = job.speaker_wav {
            command.arg("--speaker_wav").arg(speaker_wav);
        }

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        command
    }
}

#[async_trait]
impl SynthesisEngine for CommandEngine {
    async fn synthesize(&self, job: &SynthesisJob<'_>) -> crate::error::Result<()> {
        tracing::debug!(
            "engine command: language={}, text_len={}, out={}",
            job.language,
            job.text.len(),
            job.output_path.display(),
        );

        let output = self.command(job).output().await.map_err(|e| {
            tracing::error!("failed to spawn engine program {}: {e}", self.program.display());
            TtsError::synthesis(format!("failed to start engine: {e}"))
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::error!(status = %output.status, "engine program failed:\n{}", stderr.trim_end());

        Err(TtsError::synthesis(failure_message(output.status, &stderr)))
    }

    fn name(&self) -> &str {
        "command"
    }
}

/// The last non-empty stderr line carries the engine's exception message
fn failure_message(status: std::process::ExitStatus, stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map_or_else(|| format!("engine exited with {status}"), str::to_string)
}

/// Locate `program` directly or through `PATH`
fn resolve_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);

    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
