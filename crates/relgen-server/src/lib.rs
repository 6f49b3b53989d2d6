//! HTTP query service over relgen test variations
//!
//! ```text
//! GET  /healthcheck                                        OK
//! GET  /variations                                         every repo
//! GET  /variations/:repo/:branch/:trigger/:testsuite       one record
//! GET  /variations/:repo/:branch/:trigger/:testsuite/:field
//! POST /reload                                             re-read the file
//! ```
//!
//! Unknown repos and paths are `404`, unknown fields `400`, anything else
//! `500`; the body is the error text.

mod config;
pub mod error;
pub mod routes;
mod state;

pub use config::{DEFAULT_PORT, ServerConfig, ServerConfigBuilder};
pub use error::{Error, Result};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;

/// Serves one [`AppState`] over HTTP.
pub struct VariationServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl VariationServer {
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        routes::create_router(Arc::clone(&self.state))
    }

    /// Serve until interrupted with Ctrl-C.
    pub async fn run(&self) -> Result<()> {
        let addr = self.config.addr();
        let serve_error = |source| Error::Serve {
            addr: addr.to_string(),
            source,
        };

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(serve_error)?;
        tracing::info!(
            %addr,
            source = ?self.state.source().map(ToString::to_string),
            "serving variations"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(serve_error)?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
