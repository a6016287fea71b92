//! Liveness endpoint. Sits outside `/api/v1` and takes no token, so
//! deployment probes can hit it without credentials.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response body.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Crate version, for telling deployments apart.
    pub version: String,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
