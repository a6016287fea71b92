//! Success envelope shared by the query-side endpoints.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body returned for successful responses.
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub success: bool,
    pub data: T,
}

/// Wraps `data` in the `{"success": true, "data": ...}` envelope.
pub fn success<T: Serialize>(data: T) -> Response {
    Json(SuccessBody {
        success: true,
        data,
    })
    .into_response()
}
