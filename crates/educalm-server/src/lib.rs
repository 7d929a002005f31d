//! HTTP server assembly: routes, middleware and lifecycle

mod cors;
mod health;

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use educalm_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Initializes the synthesis engine once. An unavailable engine does
    /// not fail startup; the service runs in degraded mode instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the speech server cannot be assembled (invalid
    /// timeout, unwritable output directory)
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address();

        let tts_state = tts::build_server(&config).await?;

        let mut app = Router::new().merge(tts::endpoint_router().with_state(Arc::clone(&tts_state)));

        if config.server.health.enabled {
            app = app.route(
                &config.server.health.path,
                axum::routing::get(health::health_handler).with_state(tts_state),
            );
        }

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address)
            .await
            .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", self.listen_address))?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
