//! Raw-event retention purging.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use searchtrack_core::error::TrackerError;
use searchtrack_core::repository::RetentionStore;

use crate::{SqliteSearchStore, storage_err};

#[async_trait]
impl RetentionStore for SqliteSearchStore {
    async fn purge_older_than(
        &self,
        tenant_id: i64,
        horizon_days: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, TrackerError> {
        let cutoff = now - Duration::days(horizon_days.max(0));

        // Raw events only. term_rollups carry the long-horizon aggregate
        // signal and are never touched by retention.
        let result = sqlx::query(
            "DELETE FROM search_events WHERE tenant_id = ? AND created_at < ?",
        )
        .bind(tenant_id)
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}
