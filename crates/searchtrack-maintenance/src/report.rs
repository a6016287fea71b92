//! Daily report generation.

use chrono::{DateTime, NaiveDate, Utc};

use searchtrack_core::error::TrackerError;
use searchtrack_core::report::DailyReport;
use searchtrack_core::repository::ReportStore;

/// Computes and persists the report for one calendar day.
///
/// Persistence replaces any prior snapshot for the same date, so the
/// operation is safe to re-run. Delivery to the notification collaborator is
/// the caller's concern and happens after persistence.
///
/// # Errors
///
/// Returns `TrackerError::StorageUnavailable` when computation or
/// persistence fails.
pub async fn generate_daily_report(
    store: &dyn ReportStore,
    tenant_id: i64,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<DailyReport, TrackerError> {
    let report = store.day_summary(tenant_id, date, now).await?;
    store.save_report(&report).await?;
    Ok(report)
}
