//! Standalone entry point for the daily maintenance job.
//!
//! Run once per day, e.g.: `0 2 * * * searchtrack-maintenance`

use std::error::Error;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use searchtrack_core::clock::SystemClock;
use searchtrack_maintenance::notifier::LogNotifier;
use searchtrack_maintenance::runner;
use searchtrack_store::SqliteSearchStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable must be set")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    searchtrack_store::run_migrations(&pool).await?;

    let store = SqliteSearchStore::new(pool);
    let summary = runner::run_daily(&store, &SystemClock, &LogNotifier).await?;

    tracing::info!(
        tenants = summary.tenants,
        deleted_events = summary.deleted_events,
        backfilled_rollups = summary.backfilled_rollups,
        reports = summary.reports_generated,
        "maintenance run finished"
    );
    Ok(())
}
