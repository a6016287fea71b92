//! Rollup reads and maintenance.

use chrono::{DateTime, Utc};

use searchtrack_core::error::TrackerError;
use searchtrack_core::rollup::TermRollup;

use crate::{SqliteSearchStore, storage_err};

#[derive(Debug, sqlx::FromRow)]
struct RollupRow {
    tenant_id: i64,
    query: String,
    search_count: i64,
    no_result_count: i64,
    conversion_count: i64,
    last_updated_at: DateTime<Utc>,
}

impl From<RollupRow> for TermRollup {
    fn from(row: RollupRow) -> Self {
        Self {
            tenant_id: row.tenant_id,
            query: row.query,
            search_count: row.search_count,
            no_result_count: row.no_result_count,
            conversion_count: row.conversion_count,
            last_updated_at: row.last_updated_at,
        }
    }
}

impl SqliteSearchStore {
    /// Loads the rollup row for one term, if it exists.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::StorageUnavailable` on store failure.
    pub async fn rollup(
        &self,
        tenant_id: i64,
        term: &str,
    ) -> Result<Option<TermRollup>, TrackerError> {
        let row: Option<RollupRow> = sqlx::query_as(
            r"
            SELECT tenant_id, query, search_count, no_result_count,
                   conversion_count, last_updated_at
            FROM term_rollups
            WHERE tenant_id = ? AND query = ?
            ",
        )
        .bind(tenant_id)
        .bind(term)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(row.map(TermRollup::from))
    }

    /// Backfills rollup rows for terms that appear in raw events but have no
    /// rollup, e.g. because a rollup write failed after its event insert.
    ///
    /// Insert-only (`ON CONFLICT DO NOTHING`): existing rows are never
    /// re-incremented, so the pass is idempotent and cannot double-count.
    ///
    /// Returns the number of rollup rows created.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::StorageUnavailable` on store failure.
    pub async fn reconcile_rollups(
        &self,
        tenant_id: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, TrackerError> {
        let result = sqlx::query(
            r"
            INSERT INTO term_rollups
                (tenant_id, query, search_count, no_result_count, conversion_count, last_updated_at)
            SELECT
                tenant_id,
                query,
                COUNT(*),
                SUM(CASE WHEN result_count = 0 THEN 1 ELSE 0 END),
                SUM(CASE WHEN clicked_result_id IS NOT NULL THEN 1 ELSE 0 END),
                ?
            FROM search_events
            WHERE tenant_id = ?
            GROUP BY tenant_id, query
            ON CONFLICT (tenant_id, query) DO NOTHING
            ",
        )
        .bind(now)
        .bind(tenant_id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(result.rows_affected())
    }

    /// Administrative reset: deletes every rollup row for a tenant. The only
    /// path that removes rollups; normal operation never deletes them.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::StorageUnavailable` on store failure.
    pub async fn reset_rollups(&self, tenant_id: i64) -> Result<u64, TrackerError> {
        let result = sqlx::query("DELETE FROM term_rollups WHERE tenant_id = ?")
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(result.rows_affected())
    }
}
