//! Daily report snapshots.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a report's top-terms list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: i64,
}

/// Immutable summary of one calendar day of search activity.
///
/// Created once per day by the report generator; regenerating for the same
/// date replaces the prior snapshot rather than duplicating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub tenant_id: i64,
    pub date: NaiveDate,
    pub total_searches: i64,
    pub unique_terms: i64,
    pub no_result_count: i64,
    /// Top terms by occurrence count, at most ten entries.
    pub top_terms: Vec<TermCount>,
    pub generated_at: DateTime<Utc>,
}
