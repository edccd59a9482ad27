//! Service status endpoints
//!
//! `GET /` answers with a fixed liveness message. `GET /health` probes the
//! database pool and maps the result to 200 or 503 for load balancers and
//! container orchestrators.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use common::db;

use crate::AppState;

/// Fixed message served at the root endpoint
const ROOT_MESSAGE: &str = "SmartTodo+ API está funcionando corretamente";

/// Body of the root endpoint
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Liveness message
    pub message: &'static str,
}

/// Root endpoint, independent of database state
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}

/// Body of the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy", tracking the probe
    pub status: &'static str,
    /// Pinned to "connected" in the wire format regardless of the probe
    pub database: &'static str,
}

/// Health check endpoint.
///
/// Runs one liveness probe against the pool per invocation. A failed probe
/// is contained here and surfaced as 503; it never crashes the server.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    match db::ping(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: "connected",
            }),
        ),
        Err(err) => {
            tracing::warn!("Health probe failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: "connected",
                }),
            )
        }
    }
}
