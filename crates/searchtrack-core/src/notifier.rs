//! Report notification seam.

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::report::DailyReport;

/// External collaborator that delivers a daily report to an operator.
///
/// Delivery is independent of persistence: a failed handoff never prevents
/// the snapshot from being saved.
#[async_trait]
pub trait ReportNotifier: Send + Sync {
    /// Hands off one report for delivery.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Notification` when delivery fails.
    async fn deliver(&self, report: &DailyReport) -> Result<(), TrackerError>;
}
