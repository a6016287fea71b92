//! Daily report computation and persistence.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use searchtrack_core::error::TrackerError;
use searchtrack_core::report::{DailyReport, TermCount};
use searchtrack_core::repository::ReportStore;

use crate::{SqliteSearchStore, storage_err};

/// Entries kept in a report's top-terms list.
const TOP_TERMS_LEN: i64 = 10;

#[derive(Debug, sqlx::FromRow)]
struct DayTotalsRow {
    total: i64,
    unique_terms: i64,
    no_results: Option<i64>,
}

#[derive(Debug, sqlx::FromRow)]
struct TermCountRow {
    term: String,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    tenant_id: i64,
    report_date: NaiveDate,
    total_searches: i64,
    unique_terms: i64,
    no_result_count: i64,
    top_terms: String,
    generated_at: DateTime<Utc>,
}

fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

#[async_trait]
impl ReportStore for SqliteSearchStore {
    async fn day_summary(
        &self,
        tenant_id: i64,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<DailyReport, TrackerError> {
        let (day_start, day_end) = day_bounds(date);

        let totals: DayTotalsRow = sqlx::query_as(
            r"
            SELECT
                COUNT(*) AS total,
                COUNT(DISTINCT query) AS unique_terms,
                SUM(CASE WHEN result_count = 0 THEN 1 ELSE 0 END) AS no_results
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ? AND created_at < ?
            ",
        )
        .bind(tenant_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        let top_rows: Vec<TermCountRow> = sqlx::query_as(
            r"
            SELECT query AS term, COUNT(*) AS count
            FROM search_events
            WHERE tenant_id = ? AND created_at >= ? AND created_at < ?
            GROUP BY query
            ORDER BY count DESC, query ASC
            LIMIT ?
            ",
        )
        .bind(tenant_id)
        .bind(day_start)
        .bind(day_end)
        .bind(TOP_TERMS_LEN)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(DailyReport {
            tenant_id,
            date,
            total_searches: totals.total,
            unique_terms: totals.unique_terms,
            no_result_count: totals.no_results.unwrap_or(0),
            top_terms: top_rows
                .into_iter()
                .map(|r| TermCount {
                    term: r.term,
                    count: r.count,
                })
                .collect(),
            generated_at: now,
        })
    }

    async fn save_report(&self, report: &DailyReport) -> Result<(), TrackerError> {
        let top_terms = serde_json::to_string(&report.top_terms)
            .map_err(|e| TrackerError::StorageUnavailable(format!("report encoding: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO daily_reports
                (tenant_id, report_date, total_searches, unique_terms,
                 no_result_count, top_terms, generated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (tenant_id, report_date) DO UPDATE SET
                total_searches = excluded.total_searches,
                unique_terms = excluded.unique_terms,
                no_result_count = excluded.no_result_count,
                top_terms = excluded.top_terms,
                generated_at = excluded.generated_at
            ",
        )
        .bind(report.tenant_id)
        .bind(report.date)
        .bind(report.total_searches)
        .bind(report.unique_terms)
        .bind(report.no_result_count)
        .bind(top_terms)
        .bind(report.generated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn load_report(
        &self,
        tenant_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DailyReport>, TrackerError> {
        let row: Option<ReportRow> = sqlx::query_as(
            r"
            SELECT tenant_id, report_date, total_searches, unique_terms,
                   no_result_count, top_terms, generated_at
            FROM daily_reports
            WHERE tenant_id = ? AND report_date = ?
            ",
        )
        .bind(tenant_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        row.map(|r| {
            let top_terms: Vec<TermCount> = serde_json::from_str(&r.top_terms)
                .map_err(|e| TrackerError::StorageUnavailable(format!("report decoding: {e}")))?;
            Ok(DailyReport {
                tenant_id: r.tenant_id,
                date: r.report_date,
                total_searches: r.total_searches,
                unique_terms: r.unique_terms,
                no_result_count: r.no_result_count,
                top_terms,
                generated_at: r.generated_at,
            })
        })
        .transpose()
    }
}
