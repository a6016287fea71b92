//! CSV export of raw search events.

use std::collections::HashMap;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Router, extract::Query, extract::State, routing::get};

use crate::auth::require_token;
use crate::error::ApiError;
use crate::state::AppState;

fn export_err(err: impl std::fmt::Display) -> ApiError {
    ApiError::Export(err.to_string())
}

/// GET /api/v1/export?token=...
async fn export(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    require_token(&state.api_token, &params)?;

    let tenant_id = params
        .get("tenant")
        .and_then(|value| value.parse().ok())
        .unwrap_or(1);
    let events = state.store.all_events(tenant_id).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["ID", "Customer", "Search Query", "Results", "IP", "Date"])
        .map_err(export_err)?;
    for event in &events {
        writer
            .write_record([
                event.id.to_string(),
                event
                    .actor_id
                    .map_or_else(|| "Guest".to_owned(), |id| format!("Customer #{id}")),
                event.query.clone(),
                event.result_count.to_string(),
                event.source_ip.clone().unwrap_or_default(),
                event.created_at.to_rfc3339(),
            ])
            .map_err(export_err)?;
    }
    let body = writer.into_inner().map_err(export_err)?;

    let filename = format!("search_data_{}.csv", state.clock.now().date_naive());
    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, body).into_response())
}

/// Returns the export router.
pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export))
}
