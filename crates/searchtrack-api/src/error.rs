//! API error types and their JSON representation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use searchtrack_core::error::TrackerError;

/// Errors surfaced by the query-side API.
///
/// Ingestion-side failures never become an `ApiError`: the recording routes
/// swallow and log them so the search path is never degraded.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or mismatched API token. Rejected before any query runs.
    #[error("Invalid token")]
    InvalidToken,

    /// Unrecognized action name. Deliberately generic: valid action names
    /// are not leaked.
    #[error("Invalid action")]
    InvalidAction,

    /// CSV assembly failed.
    #[error("export failed: {0}")]
    Export(String),

    /// Domain or storage failure. Surfaced as an error payload with no
    /// partial data, so consumers can tell "no data" from "query failed".
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::InvalidAction | Self::Tracker(TrackerError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Export(_)
            | Self::Tracker(
                TrackerError::StorageUnavailable(_) | TrackerError::Notification(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: true,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
