//! Read-only view DTOs returned by the analytical queries.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default query window in days when the caller does not supply one.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Maximum number of rows the no-result-terms query returns.
pub const NO_RESULT_TERMS_CAP: i64 = 50;

/// One term in the top-searches ranking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTerm {
    pub query: String,
    /// Occurrences within the requested window.
    pub count: i64,
    pub avg_results: f64,
    pub no_result_count: i64,
    pub last_searched: DateTime<Utc>,
}

/// Time-bucket granularity for trend queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketUnit {
    Day,
    Week,
    Month,
}

impl BucketUnit {
    /// Parses a caller-supplied granularity, falling back to `Day`.
    ///
    /// Analytics parameters are conveniences, not critical operations, so an
    /// unrecognized value coerces to the default rather than erroring.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::Day,
        }
    }
}

/// One chronological bucket in a trend series. Buckets with no events are
/// omitted entirely; consumers must handle sparse series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub period: String,
    pub total_searches: i64,
    /// Distinct terms within the bucket.
    pub unique_searches: i64,
    /// Distinct actors, falling back to source IP for anonymous traffic.
    /// Conflates anonymous users behind a shared IP; a deliberate
    /// precision trade-off that dashboards already assume.
    pub unique_users: i64,
}

/// A term whose every occurrence in the window returned zero results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoResultTerm {
    pub query: String,
    pub attempts: i64,
    pub last_attempted: DateTime<Utc>,
}

/// One event in an actor's search history, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub query: String,
    pub result_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Search volume for one hour of the day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHour {
    /// Hour of day, 0-23.
    pub hour: i64,
    pub searches: i64,
}

/// Event count for one coarse device class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCount {
    pub device_type: String,
    pub count: i64,
}

/// Composite insight view: peak hours over a fixed seven-day window, average
/// words per query over the requested window, and a mobile/desktop split
/// over a fixed thirty-day window, derived from a user-agent substring
/// match. The device classification is a coarse approximation, not a full
/// device-detection policy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInsights {
    pub peak_hours: Vec<PeakHour>,
    pub avg_word_count: f64,
    pub device_distribution: Vec<DeviceCount>,
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_searches: i64,
    pub unique_terms: i64,
    /// Percentage of searches that returned nothing. Zero when the window
    /// is empty, never a division error.
    pub no_results_rate: f64,
    /// Distinct actors over the last day, with the IP fallback.
    pub active_users: i64,
}
