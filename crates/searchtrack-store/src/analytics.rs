//! Analytical queries over the raw event stream.
//!
//! These are recomputed from raw events rather than read from the rollups:
//! the requested window is usually narrower than a rollup's full history.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use searchtrack_core::analytics::{
    BucketUnit, DEFAULT_WINDOW_DAYS, DashboardStats, DeviceCount, HistoryEntry, NoResultTerm,
    PeakHour, SearchInsights, TopTerm, TrendBucket,
};
use searchtrack_core::error::TrackerError;
use searchtrack_core::repository::AnalyticsQueries;

use crate::{SqliteSearchStore, storage_err};

/// Peak-hour statistics always cover the trailing week, independent of the
/// caller's window.
const PEAK_HOURS_WINDOW_DAYS: i64 = 7;

fn window_start(now: DateTime<Utc>, since_days: i64) -> DateTime<Utc> {
    now - Duration::days(since_days.max(0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn bucket_format(unit: BucketUnit) -> &'static str {
    match unit {
        BucketUnit::Day => "%Y-%m-%d",
        BucketUnit::Week => "%Y-%W",
        BucketUnit::Month => "%Y-%m",
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TopTermRow {
    query: String,
    count: i64,
    avg_results: f64,
    no_result_count: i64,
    last_searched: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct TrendRow {
    period: String,
    total_searches: i64,
    unique_searches: i64,
    unique_users: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct NoResultRow {
    query: String,
    attempts: i64,
    last_attempted: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    query: String,
    result_count: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct PeakHourRow {
    hour: i64,
    searches: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    device_type: String,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct WindowTotalsRow {
    total: i64,
    unique_terms: i64,
    no_results: Option<i64>,
}

#[async_trait]
impl AnalyticsQueries for SqliteSearchStore {
    async fn top_terms(
        &self,
        tenant_id: i64,
        since_days: i64,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<TopTerm>, TrackerError> {
        let rows: Vec<TopTermRow> = sqlx::query_as(
            r"
            SELECT
                query,
                COUNT(*) AS count,
                AVG(result_count) AS avg_results,
                SUM(CASE WHEN result_count = 0 THEN 1 ELSE 0 END) AS no_result_count,
                MAX(created_at) AS last_searched
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            GROUP BY query
            ORDER BY count DESC, query ASC
            LIMIT ?
            ",
        )
        .bind(tenant_id)
        .bind(window_start(now, since_days))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|r| TopTerm {
                query: r.query,
                count: r.count,
                avg_results: round2(r.avg_results),
                no_result_count: r.no_result_count,
                last_searched: r.last_searched,
            })
            .collect())
    }

    async fn trends(
        &self,
        tenant_id: i64,
        since_days: i64,
        unit: BucketUnit,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrendBucket>, TrackerError> {
        let rows: Vec<TrendRow> = sqlx::query_as(
            r"
            SELECT
                strftime(?, created_at) AS period,
                COUNT(*) AS total_searches,
                COUNT(DISTINCT query) AS unique_searches,
                COUNT(DISTINCT COALESCE(CAST(actor_id AS TEXT), source_ip, '')) AS unique_users
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            GROUP BY period
            ORDER BY period ASC
            ",
        )
        .bind(bucket_format(unit))
        .bind(tenant_id)
        .bind(window_start(now, since_days))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|r| TrendBucket {
                period: r.period,
                total_searches: r.total_searches,
                unique_searches: r.unique_searches,
                unique_users: r.unique_users,
            })
            .collect())
    }

    async fn no_result_terms(
        &self,
        tenant_id: i64,
        since_days: i64,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<NoResultTerm>, TrackerError> {
        // HAVING MAX(result_count) = 0: one successful occurrence in the
        // window disqualifies the term entirely.
        let rows: Vec<NoResultRow> = sqlx::query_as(
            r"
            SELECT
                query,
                COUNT(*) AS attempts,
                MAX(created_at) AS last_attempted
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            GROUP BY query
            HAVING MAX(result_count) = 0
            ORDER BY attempts DESC, query ASC
            LIMIT ?
            ",
        )
        .bind(tenant_id)
        .bind(window_start(now, since_days))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|r| NoResultTerm {
                query: r.query,
                attempts: r.attempts,
                last_attempted: r.last_attempted,
            })
            .collect())
    }

    async fn actor_history(
        &self,
        tenant_id: i64,
        actor_id: i64,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, TrackerError> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            r"
            SELECT query, result_count, created_at
            FROM search_events
            WHERE tenant_id = ? AND actor_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            ",
        )
        .bind(tenant_id)
        .bind(actor_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|r| HistoryEntry {
                query: r.query,
                result_count: r.result_count,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn insights(
        &self,
        tenant_id: i64,
        since_days: i64,
        now: DateTime<Utc>,
    ) -> Result<SearchInsights, TrackerError> {
        let peak_rows: Vec<PeakHourRow> = sqlx::query_as(
            r"
            SELECT
                CAST(strftime('%H', created_at) AS INTEGER) AS hour,
                COUNT(*) AS searches
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            GROUP BY hour
            ORDER BY searches DESC, hour ASC
            LIMIT 5
            ",
        )
        .bind(tenant_id)
        .bind(window_start(now, PEAK_HOURS_WINDOW_DAYS))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        // Word count approximated by separator counting; a blank query
        // counts as one word, matching the dashboard's historical behavior.
        let avg_word_count: Option<f64> = sqlx::query_scalar(
            r"
            SELECT AVG(LENGTH(query) - LENGTH(REPLACE(query, ' ', '')) + 1)
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            ",
        )
        .bind(tenant_id)
        .bind(window_start(now, since_days))
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        // Substring match on the user agent; coarse but sufficient for the
        // mobile/desktop split the dashboard shows. Like peak hours, the
        // split has its own fixed window; `since_days` governs only the
        // word-count average.
        let device_rows: Vec<DeviceRow> = sqlx::query_as(
            r"
            SELECT
                CASE WHEN user_agent LIKE '%Mobile%' THEN 'Mobile' ELSE 'Desktop' END
                    AS device_type,
                COUNT(*) AS count
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            GROUP BY device_type
            ORDER BY device_type ASC
            ",
        )
        .bind(tenant_id)
        .bind(window_start(now, DEFAULT_WINDOW_DAYS))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(SearchInsights {
            peak_hours: peak_rows
                .into_iter()
                .map(|r| PeakHour {
                    hour: r.hour,
                    searches: r.searches,
                })
                .collect(),
            avg_word_count: round2(avg_word_count.unwrap_or(0.0)),
            device_distribution: device_rows
                .into_iter()
                .map(|r| DeviceCount {
                    device_type: r.device_type,
                    count: r.count,
                })
                .collect(),
        })
    }

    async fn overview(
        &self,
        tenant_id: i64,
        since_days: i64,
        now: DateTime<Utc>,
    ) -> Result<DashboardStats, TrackerError> {
        let totals: WindowTotalsRow = sqlx::query_as(
            r"
            SELECT
                COUNT(*) AS total,
                COUNT(DISTINCT query) AS unique_terms,
                SUM(CASE WHEN result_count = 0 THEN 1 ELSE 0 END) AS no_results
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            ",
        )
        .bind(tenant_id)
        .bind(window_start(now, since_days))
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        let active_users: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(DISTINCT COALESCE(CAST(actor_id AS TEXT), source_ip, ''))
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ?
            ",
        )
        .bind(tenant_id)
        .bind(window_start(now, 1))
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        let no_results = totals.no_results.unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let no_results_rate = if totals.total > 0 {
            round2(no_results as f64 / totals.total as f64 * 100.0)
        } else {
            0.0
        };

        Ok(DashboardStats {
            total_searches: totals.total,
            unique_terms: totals.unique_terms,
            no_results_rate,
            active_users,
        })
    }
}
