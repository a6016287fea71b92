//! Per-tenant tracker settings.

use std::collections::HashMap;

use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router, extract::Query, extract::State};
use serde::Deserialize;

use searchtrack_core::repository::SettingsStore;
use searchtrack_core::settings::TrackerSettings;

use crate::auth::require_token;
use crate::error::ApiError;
use crate::response::success;
use crate::state::AppState;

fn default_tenant_id() -> i64 {
    1
}

/// Settings update payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default = "default_tenant_id")]
    pub tenant_id: i64,
    pub tracking_enabled: bool,
    pub retention_days: i64,
}

/// GET /api/v1/settings?token=...
async fn get_settings(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    require_token(&state.api_token, &params)?;
    let tenant_id = params
        .get("tenant")
        .and_then(|value| value.parse().ok())
        .unwrap_or(1);
    let settings = state.store.settings(tenant_id).await?;
    Ok(success(settings))
}

/// PUT /api/v1/settings?token=...
async fn update_settings(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Response, ApiError> {
    require_token(&state.api_token, &params)?;

    if update.retention_days <= 0 {
        return Err(ApiError::Tracker(
            searchtrack_core::error::TrackerError::Validation(
                "retention_days must be positive".to_owned(),
            ),
        ));
    }

    let settings = TrackerSettings {
        tracking_enabled: update.tracking_enabled,
        retention_days: update.retention_days,
    };
    state
        .store
        .update_settings(update.tenant_id, &settings)
        .await?;
    Ok(success(settings))
}

/// Returns the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
