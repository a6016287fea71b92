//! Per-term rollup aggregates.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Running aggregate for one `(tenant, term)` pair.
///
/// Created on the first occurrence of a term and updated on every subsequent
/// occurrence. Never deleted by retention: this is the durable long-horizon
/// signal that survives raw-event purges.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRollup {
    pub tenant_id: i64,
    /// Normalized term, unique within the tenant.
    pub query: String,
    /// Total occurrences. Monotonically non-decreasing.
    pub search_count: i64,
    /// Occurrences that returned zero results. Always `<= search_count`.
    pub no_result_count: i64,
    /// Occurrences later associated with a click-through.
    pub conversion_count: i64,
    /// Timestamp of the most recent contributing event.
    pub last_updated_at: DateTime<Utc>,
}
