//! Repository trait seams between the domain and the storage layer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::analytics::{
    BucketUnit, DashboardStats, HistoryEntry, NoResultTerm, SearchInsights, TopTerm, TrendBucket,
};
use crate::error::TrackerError;
use crate::event::{ClickInput, SearchEvent, SearchEventInput};
use crate::report::DailyReport;
use crate::settings::TrackerSettings;

/// Ingestion seam: persists raw events and keeps rollups current.
#[async_trait]
pub trait EventRecorder: Send + Sync {
    /// Records one search event and applies the rollup upsert for its term.
    ///
    /// Returns `None` without touching the store when tracking is disabled
    /// for the tenant. The enabled flag is checked on every call.
    ///
    /// The rollup update must be a single atomic conditional write: two
    /// concurrent recordings of the same term must both count.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Validation` for a negative result count and
    /// `TrackerError::StorageUnavailable` when the store cannot be reached.
    async fn record(
        &self,
        input: &SearchEventInput,
        now: DateTime<Utc>,
    ) -> Result<Option<SearchEvent>, TrackerError>;

    /// Associates a click with the actor's most recent un-clicked search
    /// within a short session window. Best-effort: there is no strict
    /// foreign-key linkage from a click back to its search.
    ///
    /// Returns `true` when a search event was updated.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::StorageUnavailable` on store failure.
    async fn attach_click(
        &self,
        input: &ClickInput,
        now: DateTime<Utc>,
    ) -> Result<bool, TrackerError>;
}

/// Read-only analytical queries, all tenant-scoped and windowed.
#[async_trait]
pub trait AnalyticsQueries: Send + Sync {
    /// Terms ranked by occurrence count within the window, recomputed from
    /// raw events. Ties break alphabetically by term.
    async fn top_terms(
        &self,
        tenant_id: i64,
        since_days: i64,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<TopTerm>, TrackerError>;

    /// Events grouped into chronological buckets. Empty buckets are omitted.
    async fn trends(
        &self,
        tenant_id: i64,
        since_days: i64,
        unit: BucketUnit,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrendBucket>, TrackerError>;

    /// Terms where every occurrence in the window returned zero results.
    async fn no_result_terms(
        &self,
        tenant_id: i64,
        since_days: i64,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<NoResultTerm>, TrackerError>;

    /// Most recent events for one actor, newest first.
    async fn actor_history(
        &self,
        tenant_id: i64,
        actor_id: i64,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, TrackerError>;

    /// Peak hours, query complexity, and device split. `since_days` governs
    /// the word-count average only: peak hours use a fixed seven-day window
    /// and the device split a fixed thirty-day window.
    async fn insights(
        &self,
        tenant_id: i64,
        since_days: i64,
        now: DateTime<Utc>,
    ) -> Result<SearchInsights, TrackerError>;

    /// Headline dashboard figures over the window.
    async fn overview(
        &self,
        tenant_id: i64,
        since_days: i64,
        now: DateTime<Utc>,
    ) -> Result<DashboardStats, TrackerError>;
}

/// Retention seam: purges raw events past the configured horizon.
#[async_trait]
pub trait RetentionStore: Send + Sync {
    /// Deletes raw events older than `now - horizon_days`. Rollups are not
    /// touched: aggregate history must survive raw-event deletion.
    ///
    /// Idempotent: a second run with no intervening writes deletes nothing.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::StorageUnavailable` on store failure.
    async fn purge_older_than(
        &self,
        tenant_id: i64,
        horizon_days: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, TrackerError>;
}

/// Report persistence seam.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Computes the summary for the exact calendar day `date` (not a
    /// rolling window) from raw events. Does not persist.
    async fn day_summary(
        &self,
        tenant_id: i64,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<DailyReport, TrackerError>;

    /// Persists a snapshot, replacing any prior snapshot for the same date.
    async fn save_report(&self, report: &DailyReport) -> Result<(), TrackerError>;

    /// Loads a previously persisted snapshot.
    async fn load_report(
        &self,
        tenant_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DailyReport>, TrackerError>;
}

/// Per-tenant configuration seam.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the tenant's settings, with defaults for anything unset.
    async fn settings(&self, tenant_id: i64) -> Result<TrackerSettings, TrackerError>;

    /// Persists the tenant's settings.
    async fn update_settings(
        &self,
        tenant_id: i64,
        settings: &TrackerSettings,
    ) -> Result<(), TrackerError>;
}
