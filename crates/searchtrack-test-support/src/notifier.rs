//! Notifier doubles for report-delivery tests.

use std::sync::Mutex;

use async_trait::async_trait;
use searchtrack_core::error::TrackerError;
use searchtrack_core::notifier::ReportNotifier;
use searchtrack_core::report::DailyReport;

/// Captures every delivered report for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<DailyReport>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything delivered so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn delivered(&self) -> Vec<DailyReport> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportNotifier for RecordingNotifier {
    async fn deliver(&self, report: &DailyReport) -> Result<(), TrackerError> {
        self.delivered.lock().unwrap().push(report.clone());
        Ok(())
    }
}

/// Always fails delivery, for exercising the persistence-first guarantee.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl ReportNotifier for FailingNotifier {
    async fn deliver(&self, _report: &DailyReport) -> Result<(), TrackerError> {
        Err(TrackerError::Notification("delivery rejected".to_owned()))
    }
}
