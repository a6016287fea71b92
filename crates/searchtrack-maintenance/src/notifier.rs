//! Default report notifier.

use async_trait::async_trait;

use searchtrack_core::error::TrackerError;
use searchtrack_core::notifier::ReportNotifier;
use searchtrack_core::report::DailyReport;

/// Writes the report summary to the log sink. Stands in for an outbound
/// delivery channel (mail, webhook) which is deployment-specific.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl ReportNotifier for LogNotifier {
    async fn deliver(&self, report: &DailyReport) -> Result<(), TrackerError> {
        tracing::info!(
            tenant_id = report.tenant_id,
            date = %report.date,
            total_searches = report.total_searches,
            unique_terms = report.unique_terms,
            no_result_count = report.no_result_count,
            "daily search report"
        );
        for entry in &report.top_terms {
            tracing::info!(
                tenant_id = report.tenant_id,
                term = %entry.term,
                count = entry.count,
                "top search term"
            );
        }
        Ok(())
    }
}
