//! SQLite implementation of the Search Tracker repositories.
//!
//! One store handle implements every repository seam from
//! `searchtrack-core`: event recording with the atomic rollup upsert,
//! the analytical queries, retention purging, report persistence, and
//! per-tenant settings. All coordination is store-level; the handle holds
//! no mutable in-memory state.

use sqlx::SqlitePool;

use searchtrack_core::error::TrackerError;

pub mod analytics;
pub mod recorder;
pub mod reports;
pub mod retention;
pub mod rollup;
pub mod settings;

/// SQLite-backed search analytics store.
#[derive(Debug, Clone)]
pub struct SqliteSearchStore {
    pool: SqlitePool,
}

impl SqliteSearchStore {
    /// Creates a new store over an existing connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All tenants known to the store, from events or explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::StorageUnavailable` on store failure.
    pub async fn tenant_ids(&self) -> Result<Vec<i64>, TrackerError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r"
            SELECT DISTINCT tenant_id FROM search_events
            UNION
            SELECT DISTINCT tenant_id FROM tracker_settings
            ORDER BY tenant_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(ids)
    }
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns `TrackerError::StorageUnavailable` when migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), TrackerError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| TrackerError::StorageUnavailable(e.to_string()))
}

pub(crate) fn storage_err(err: sqlx::Error) -> TrackerError {
    TrackerError::StorageUnavailable(err.to_string())
}
