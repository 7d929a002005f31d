use std::path::PathBuf;

use clap::Parser;

/// Configuration file picked up from the working directory when present
pub const DEFAULT_CONFIG_PATH: &str = "educalm.toml";

/// Educalm speech service
#[derive(Debug, Parser)]
#[command(name = "educalm", about = "HTTP text-to-speech service backed by a multilingual synthesis engine")]
pub struct Args {
    /// Path to configuration file (defaults to ./educalm.toml when it exists)
    #[arg(short, long, env = "EDUCALM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "EDUCALM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter, e.g. "info" or "info,tts=debug"
    #[arg(long, default_value = "info", env = "EDUCALM_LOG")]
    pub log_level: String,
}
