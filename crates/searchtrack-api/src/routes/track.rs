//! Ingestion endpoints: search recording and click attribution.
//!
//! Both are best-effort by contract: a storage failure is logged and the
//! response still reports success, so the search-serving path's latency and
//! outcome are never coupled to analytics-store availability.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;

use searchtrack_core::event::{ClickInput, SearchEventInput};
use searchtrack_core::repository::EventRecorder;

use crate::state::AppState;

/// Acknowledgement for an ingestion call. `success` is always true;
/// `recorded` says whether anything was persisted (tracking may be
/// disabled, or the store may have been unavailable).
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    pub recorded: bool,
}

/// POST /api/v1/track
async fn track(
    State(state): State<AppState>,
    Json(input): Json<SearchEventInput>,
) -> Json<TrackResponse> {
    let now = state.clock.now();
    let recorded = match state.store.record(&input, now).await {
        Ok(event) => event.is_some(),
        Err(err) => {
            tracing::warn!(
                tenant_id = input.tenant_id,
                error = %err,
                "search event recording failed"
            );
            false
        }
    };
    Json(TrackResponse {
        success: true,
        recorded,
    })
}

/// Acknowledgement for a click call.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub success: bool,
    pub attached: bool,
}

/// POST /api/v1/click
async fn click(
    State(state): State<AppState>,
    Json(input): Json<ClickInput>,
) -> Json<ClickResponse> {
    let now = state.clock.now();
    let attached = match state.store.attach_click(&input, now).await {
        Ok(attached) => attached,
        Err(err) => {
            tracing::warn!(
                tenant_id = input.tenant_id,
                error = %err,
                "click attribution failed"
            );
            false
        }
    };
    Json(ClickResponse {
        success: true,
        attached,
    })
}

/// Returns the ingestion router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/track", post(track))
        .route("/click", post(click))
}
