//! Health check handlers

use std::sync::atomic::Ordering;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::server::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "running",
        "service": crate::NAME,
        "version": crate::VERSION,
    }))
}

/// GET /health
///
/// Always 200 while the process is up.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /ready
pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Readiness check: database ping failed");
            false
        }
    };
    let bot = state.bot_running.load(Ordering::SeqCst);

    if database && bot {
        (StatusCode::OK, Json(json!({ "status": "ready", "database": true, "bot": true })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "database": database, "bot": bot })),
        )
    }
}
