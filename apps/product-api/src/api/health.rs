//! Readiness endpoint
//!
//! Liveness (`/health`) is added by `axum_helpers::create_router`; readiness
//! lives here because it needs the MongoDB handle.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    service: String,
    version: String,
}

async fn ready(state: AppState) -> Json<ReadyResponse> {
    let status = match state.db.list_collection_names().await {
        Ok(_) => "ready",
        Err(_) => "degraded",
    };

    Json(ReadyResponse {
        status: status.to_string(),
        service: "product-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn ready_router(state: AppState) -> Router {
    Router::new().route("/ready", get(move || ready(state)))
}
