//! HTTP server setup and lifecycle.
//!
//! Exposes a single route:
//!
//! | Method | Path | Body | Success |
//! |--------|------|------|---------|
//! | `POST` | `/remove_duplicates` | `{"file_contents": "<csv>"}` | `{"message": "...", "cleaned_csv": "<csv>"}` |
//!
//! Errors are returned as `{"error": "..."}` with status 400 for client
//! mistakes (missing `file_contents`, undecodable body, malformed CSV) and
//! 500 for internal failures.

mod error;
mod handlers;
mod middleware;

pub use error::ApiError;

use crate::config::ServerConfig;
use crate::services::DeduplicationService;
use crate::{Error, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, header};
use axum::routing::post;
use axum::{Router, middleware::from_fn};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Route path for deduplication requests.
pub const REMOVE_DUPLICATES_PATH: &str = "/remove_duplicates";

/// Shared state handed to every handler.
#[derive(Debug, Default)]
pub struct AppState {
    /// Deduplication service.
    pub service: DeduplicationService,
}

/// HTTP server for csv-dedup.
#[derive(Debug, Clone, Default)]
pub struct HttpServer {
    config: ServerConfig,
    service: DeduplicationService,
}

impl HttpServer {
    /// Creates a server with the given settings.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            service: DeduplicationService::new(),
        }
    }

    /// Sets the bind host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the bind port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Returns the server settings.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Builds the axum router.
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            service: self.service,
        });

        let body_limit = self
            .config
            .max_body_bytes
            .map_or_else(DefaultBodyLimit::disable, DefaultBodyLimit::max);

        Router::new()
            .route(REMOVE_DUPLICATES_PATH, post(handlers::remove_duplicates))
            .layer(body_limit)
            .layer(from_fn(middleware::request_context))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn start(&self) -> Result<()> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| Error::OperationFailed {
                operation: "bind".to_string(),
                cause: format!("{}:{}: {e}", self.config.host, self.config.port),
            })?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already-bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(|e| Error::OperationFailed {
            operation: "local_addr".to_string(),
            cause: e.to_string(),
        })?;
        tracing::info!(%addr, "Starting csv-dedup HTTP server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| Error::OperationFailed {
                operation: "serve".to_string(),
                cause: e.to_string(),
            })?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
