//! HTTP route modules.

use axum::Router;

use crate::state::AppState;

pub mod analytics;
pub mod export;
pub mod health;
pub mod settings;
pub mod track;

/// Returns the combined `/api/v1` router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(track::router())
        .merge(analytics::router())
        .merge(export::router())
        .merge(settings::router())
}
