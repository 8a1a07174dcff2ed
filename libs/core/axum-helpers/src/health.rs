//! Liveness endpoint plumbing.

use axum::Json;
use serde::Serialize;

/// Body of the `/health` liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Minimal liveness handler: the process is up and serving.
///
/// Readiness (datastore reachability and the like) belongs to the
/// application, which owns the connections to check.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
