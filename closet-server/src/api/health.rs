//! Health check endpoint
//!
//! Reports the build and whether the database answers a trivial query, so a
//! monitor can tell a live process from a usable one.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the database is unreachable
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    /// "ok" or "unavailable"
    pub database: &'static str,
}

/// GET /health
///
/// Does NOT require authentication. Answers 503 while the database is
/// unavailable.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match sqlx::query("SELECT 1").execute(state.store.pool()).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check database probe failed: {}", e);
            false
        }
    };

    let (code, status, database) = if database_ok {
        (StatusCode::OK, "ok", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
    };

    (
        code,
        Json(HealthResponse {
            status,
            module: "closet-server",
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            database,
        }),
    )
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
