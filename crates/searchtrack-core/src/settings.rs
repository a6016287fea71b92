//! Per-tenant tracker configuration.

use serde::{Deserialize, Serialize};

/// Default raw-event retention horizon in days.
pub const DEFAULT_RETENTION_DAYS: i64 = 90;

/// Tunable tracker behavior for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSettings {
    /// When false, `record` is a no-op for the tenant.
    pub tracking_enabled: bool,
    /// Raw events older than this horizon are purged by the daily
    /// maintenance run. Rollups are unaffected.
    pub retention_days: i64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            tracking_enabled: true,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}
