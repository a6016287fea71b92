//! The dashboard query API: one action per call.

use std::collections::HashMap;

use axum::response::Response;
use axum::{Router, extract::Query, extract::State, routing::get};

use searchtrack_core::analytics::{BucketUnit, DEFAULT_WINDOW_DAYS, NO_RESULT_TERMS_CAP};
use searchtrack_core::repository::AnalyticsQueries;

use crate::auth::require_token;
use crate::error::ApiError;
use crate::response::success;
use crate::state::AppState;

/// Largest top-terms page a caller may request.
const TOP_TERMS_CAP: i64 = 100;
/// Largest history page a caller may request.
const HISTORY_CAP: i64 = 200;

/// Parses a numeric query parameter, coercing anything malformed to the
/// default. Analytics parameters are conveniences, not critical inputs.
fn int_param(params: &HashMap<String, String>, name: &str, default: i64) -> i64 {
    params
        .get(name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn str_param<'a>(params: &'a HashMap<String, String>, name: &str) -> &'a str {
    params.get(name).map_or("", String::as_str)
}

/// GET /api/v1/analytics?action=...&token=...
async fn analytics(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    require_token(&state.api_token, &params)?;

    let now = state.clock.now();
    let tenant_id = int_param(&params, "tenant", 1);
    let days = int_param(&params, "days", DEFAULT_WINDOW_DAYS);

    match str_param(&params, "action") {
        "getTopSearches" => {
            // Clamped: a negative LIMIT would disable the bound entirely.
            let limit = int_param(&params, "limit", 20).clamp(1, TOP_TERMS_CAP);
            let data = state.store.top_terms(tenant_id, days, limit, now).await?;
            Ok(success(data))
        }
        "getSearchTrends" => {
            // Accept the legacy snake_case parameter name as well.
            let group_by = params
                .get("groupBy")
                .or_else(|| params.get("group_by"))
                .map_or("", String::as_str);
            let unit = BucketUnit::parse(group_by);
            let data = state.store.trends(tenant_id, days, unit, now).await?;
            Ok(success(data))
        }
        "getNoResultsSearches" => {
            let limit =
                int_param(&params, "limit", NO_RESULT_TERMS_CAP).clamp(1, NO_RESULT_TERMS_CAP);
            let data = state
                .store
                .no_result_terms(tenant_id, days, limit, now)
                .await?;
            Ok(success(data))
        }
        "getCustomerSearchHistory" => {
            let actor_id = int_param(&params, "actorId", 0);
            let limit = int_param(&params, "limit", 50).clamp(1, HISTORY_CAP);
            let data = state.store.actor_history(tenant_id, actor_id, limit).await?;
            Ok(success(data))
        }
        "getSearchInsights" => {
            let data = state.store.insights(tenant_id, days, now).await?;
            Ok(success(data))
        }
        "getDashboardStats" => {
            let data = state.store.overview(tenant_id, days, now).await?;
            Ok(success(data))
        }
        _ => Err(ApiError::InvalidAction),
    }
}

/// Returns the analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/analytics", get(analytics))
}
