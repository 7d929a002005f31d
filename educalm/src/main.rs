#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::path::{Path, PathBuf};

use args::{Args, DEFAULT_CONFIG_PATH};
use clap::Parser;
use educalm_config::Config;
use educalm_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .or_else(|| Path::new(DEFAULT_CONFIG_PATH).is_file().then(|| PathBuf::from(DEFAULT_CONFIG_PATH)));

    let mut config = match config_path {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    let _telemetry_guard = educalm_telemetry::init(config.telemetry.as_ref(), &args.log_level)?;

    match config_path {
        Some(ref path) => tracing::info!(config_path = %path.display(), "starting educalm"),
        None => tracing::info!("starting educalm with default configuration"),
    }

    let server = Server::new(config).await?;

    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("educalm stopped");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
