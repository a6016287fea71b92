//! Event recording and click attribution.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use searchtrack_core::error::TrackerError;
use searchtrack_core::event::{ClickInput, SearchEvent, SearchEventInput, normalize_term};
use searchtrack_core::repository::{EventRecorder, SettingsStore};

use crate::{SqliteSearchStore, storage_err};

/// How far back a click may attach to a search from the same actor.
const CLICK_SESSION_WINDOW_MINUTES: i64 = 30;

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    tenant_id: i64,
    actor_id: Option<i64>,
    query: String,
    result_count: i64,
    clicked_result_id: Option<i64>,
    source_ip: Option<String>,
    user_agent: Option<String>,
    referrer: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for SearchEvent {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            tenant_id: row.tenant_id,
            actor_id: row.actor_id,
            query: row.query,
            result_count: row.result_count,
            clicked_result_id: row.clicked_result_id,
            source_ip: row.source_ip,
            user_agent: row.user_agent,
            referrer: row.referrer,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl EventRecorder for SqliteSearchStore {
    async fn record(
        &self,
        input: &SearchEventInput,
        now: DateTime<Utc>,
    ) -> Result<Option<SearchEvent>, TrackerError> {
        if input.result_count < 0 {
            return Err(TrackerError::Validation(format!(
                "result_count must be non-negative, got {}",
                input.result_count
            )));
        }

        let settings = self.settings(input.tenant_id).await?;
        if !settings.tracking_enabled {
            return Ok(None);
        }

        let term = normalize_term(&input.query);

        // Event insert and rollup upsert commit together: a half-applied
        // pair would leave an existing rollup permanently undercounted,
        // and reconciliation only backfills rows that are missing outright.
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO search_events
                (tenant_id, actor_id, query, result_count, source_ip, user_agent, referrer, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(input.tenant_id)
        .bind(input.actor_id)
        .bind(&term)
        .bind(input.result_count)
        .bind(input.source_ip.as_deref())
        .bind(input.user_agent.as_deref())
        .bind(input.referrer.as_deref())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        // Single conditional write: insert-or-increment. A read-then-write
        // pair here would drop increments under concurrent recorders.
        let no_result = i64::from(input.result_count == 0);
        sqlx::query(
            r"
            INSERT INTO term_rollups
                (tenant_id, query, search_count, no_result_count, conversion_count, last_updated_at)
            VALUES (?, ?, 1, ?, 0, ?)
            ON CONFLICT (tenant_id, query) DO UPDATE SET
                search_count = search_count + 1,
                no_result_count = no_result_count + excluded.no_result_count,
                last_updated_at = excluded.last_updated_at
            ",
        )
        .bind(input.tenant_id)
        .bind(&term)
        .bind(no_result)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;

        Ok(Some(SearchEvent {
            id: inserted.last_insert_rowid(),
            tenant_id: input.tenant_id,
            actor_id: input.actor_id,
            query: term,
            result_count: input.result_count,
            clicked_result_id: None,
            source_ip: input.source_ip.clone(),
            user_agent: input.user_agent.clone(),
            referrer: input.referrer.clone(),
            created_at: now,
        }))
    }

    async fn attach_click(
        &self,
        input: &ClickInput,
        now: DateTime<Utc>,
    ) -> Result<bool, TrackerError> {
        if input.clicked_result_id <= 0 {
            return Ok(false);
        }

        let cutoff = now - Duration::minutes(CLICK_SESSION_WINDOW_MINUTES);

        // The click carries no search-event id; the join is the session
        // heuristic "most recent un-clicked search by the same actor".
        let candidate: Option<(i64, String)> = if let Some(actor_id) = input.actor_id {
            sqlx::query_as(
                r"
                SELECT id, query FROM search_events
                WHERE tenant_id = ? AND actor_id = ?
                  AND clicked_result_id IS NULL AND created_at >= ?
                ORDER BY created_at DESC, id DESC
                LIMIT 1
                ",
            )
            .bind(input.tenant_id)
            .bind(actor_id)
            .bind(cutoff)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
        } else if let Some(source_ip) = input.source_ip.as_deref() {
            sqlx::query_as(
                r"
                SELECT id, query FROM search_events
                WHERE tenant_id = ? AND actor_id IS NULL AND source_ip = ?
                  AND clicked_result_id IS NULL AND created_at >= ?
                ORDER BY created_at DESC, id DESC
                LIMIT 1
                ",
            )
            .bind(input.tenant_id)
            .bind(source_ip)
            .bind(cutoff)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
        } else {
            None
        };

        let Some((event_id, term)) = candidate else {
            return Ok(false);
        };

        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        sqlx::query("UPDATE search_events SET clicked_result_id = ? WHERE id = ?")
            .bind(input.clicked_result_id)
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        sqlx::query(
            r"
            UPDATE term_rollups
            SET conversion_count = conversion_count + 1, last_updated_at = ?
            WHERE tenant_id = ? AND query = ?
            ",
        )
        .bind(now)
        .bind(input.tenant_id)
        .bind(&term)
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;
        Ok(true)
    }
}

impl SqliteSearchStore {
    /// All raw events for a tenant, newest first. Backs the CSV export.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::StorageUnavailable` on store failure.
    pub async fn all_events(&self, tenant_id: i64) -> Result<Vec<SearchEvent>, TrackerError> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r"
            SELECT id, tenant_id, actor_id, query, result_count, clicked_result_id,
                   source_ip, user_agent, referrer, created_at
            FROM search_events
            WHERE tenant_id = ?
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(rows.into_iter().map(SearchEvent::from).collect())
    }
}
