//! Keep-alive HTTP server
//!
//! Hosting platforms that expect a listening port poll `/health`; `/ready`
//! reports whether the bot can actually serve users.

pub mod health;

use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::database::BannerStore;
use crate::utils::errors::{BannerBotError, Result};

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BannerStore>,
    /// Cleared when the dispatcher task exits
    pub bot_running: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(store: Arc<dyn BannerStore>, bot_running: Arc<AtomicBool>) -> Self {
        Self { store, bot_running }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(config: &ServerConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| BannerBotError::Config(format!("Invalid server address: {}", e)))?;

    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
