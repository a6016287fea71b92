//! The daily maintenance run.

use chrono::Duration;

use searchtrack_core::clock::Clock;
use searchtrack_core::error::TrackerError;
use searchtrack_core::notifier::ReportNotifier;
use searchtrack_core::repository::{RetentionStore, SettingsStore};
use searchtrack_store::SqliteSearchStore;

use crate::report;

/// Outcome of one maintenance run.
#[derive(Debug, Default)]
pub struct MaintenanceSummary {
    /// Tenants processed.
    pub tenants: usize,
    /// Raw events deleted by retention across all tenants.
    pub deleted_events: u64,
    /// Rollup rows backfilled across all tenants.
    pub backfilled_rollups: u64,
    /// Daily reports generated and persisted.
    pub reports_generated: usize,
}

/// Runs retention purge, rollup reconciliation, and report generation for
/// every known tenant, in that order.
///
/// The report covers "yesterday" relative to the clock. Notification
/// failures are logged and never abort the run; any other step failure
/// aborts the remaining steps — deletion and reporting are not
/// time-critical and retry at the next scheduled run.
///
/// # Errors
///
/// Returns the first `TrackerError` raised by a purge, reconciliation, or
/// report step.
pub async fn run_daily(
    store: &SqliteSearchStore,
    clock: &dyn Clock,
    notifier: &dyn ReportNotifier,
) -> Result<MaintenanceSummary, TrackerError> {
    let now = clock.now();
    let report_date = (now - Duration::days(1)).date_naive();

    tracing::info!("starting search tracker maintenance");

    let tenants = store.tenant_ids().await?;
    let mut summary = MaintenanceSummary {
        tenants: tenants.len(),
        ..MaintenanceSummary::default()
    };

    for tenant_id in tenants {
        let settings = store.settings(tenant_id).await?;

        let deleted = store
            .purge_older_than(tenant_id, settings.retention_days, now)
            .await?;
        summary.deleted_events += deleted;
        tracing::info!(tenant_id, deleted, "purged expired search events");

        let backfilled = store.reconcile_rollups(tenant_id, now).await?;
        summary.backfilled_rollups += backfilled;
        tracing::info!(tenant_id, backfilled, "reconciled term rollups");

        let daily = report::generate_daily_report(store, tenant_id, report_date, now).await?;
        summary.reports_generated += 1;
        tracing::info!(
            tenant_id,
            date = %daily.date,
            total_searches = daily.total_searches,
            "generated daily report"
        );

        if let Err(err) = notifier.deliver(&daily).await {
            tracing::warn!(tenant_id, error = %err, "report notification failed");
        }
    }

    tracing::info!(
        tenants = summary.tenants,
        deleted_events = summary.deleted_events,
        reports = summary.reports_generated,
        "maintenance completed"
    );
    Ok(summary)
}
