//! Integration tests for event recording and the rollup upsert.

use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;

use searchtrack_core::error::TrackerError;
use searchtrack_core::event::SearchEventInput;
use searchtrack_core::repository::{EventRecorder, SettingsStore};
use searchtrack_core::settings::TrackerSettings;
use searchtrack_store::SqliteSearchStore;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

fn input(query: &str, result_count: i64) -> SearchEventInput {
    SearchEventInput {
        query: query.to_owned(),
        result_count,
        ..SearchEventInput::default()
    }
}

// --- record ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_persists_event_and_creates_rollup(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();

    let event = store.record(&input("shoes", 5), now).await.unwrap().unwrap();

    assert!(event.id > 0);
    assert_eq!(event.query, "shoes");
    assert_eq!(event.result_count, 5);
    assert_eq!(event.created_at, now);

    let rollup = store.rollup(1, "shoes").await.unwrap().unwrap();
    assert_eq!(rollup.search_count, 1);
    assert_eq!(rollup.no_result_count, 0);
    assert_eq!(rollup.conversion_count, 0);
    assert_eq!(rollup.last_updated_at, now);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_increments_existing_rollup(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();

    store.record(&input("shoes", 5), now).await.unwrap();
    store.record(&input("shoes", 0), now).await.unwrap();
    store.record(&input("shoes", 3), now).await.unwrap();

    let rollup = store.rollup(1, "shoes").await.unwrap().unwrap();
    assert_eq!(rollup.search_count, 3);
    assert_eq!(rollup.no_result_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_normalizes_term_for_rollup_keying(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();

    store.record(&input("  shoes ", 2), now).await.unwrap();
    store.record(&input("shoes", 1), now).await.unwrap();

    let rollup = store.rollup(1, "shoes").await.unwrap().unwrap();
    assert_eq!(rollup.search_count, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_accepts_empty_query(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);

    let event = store
        .record(&input("", 0), fixed_now())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(event.query, "");
    let rollup = store.rollup(1, "").await.unwrap().unwrap();
    assert_eq!(rollup.search_count, 1);
    assert_eq!(rollup.no_result_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_rejects_negative_result_count(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);

    let result = store.record(&input("shoes", -1), fixed_now()).await;

    match result {
        Err(TrackerError::Validation(_)) => {}
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_is_noop_when_tracking_disabled(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();
    store
        .update_settings(
            1,
            &TrackerSettings {
                tracking_enabled: false,
                retention_days: 90,
            },
        )
        .await
        .unwrap();

    let recorded = store.record(&input("shoes", 5), now).await.unwrap();

    assert!(recorded.is_none());
    assert!(store.rollup(1, "shoes").await.unwrap().is_none());
    assert!(store.all_events(1).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_reenabled_after_disable(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();
    store
        .update_settings(
            1,
            &TrackerSettings {
                tracking_enabled: false,
                retention_days: 90,
            },
        )
        .await
        .unwrap();
    store.record(&input("shoes", 5), now).await.unwrap();

    // The flag is consulted on every call, not cached.
    store
        .update_settings(1, &TrackerSettings::default())
        .await
        .unwrap();
    let recorded = store.record(&input("shoes", 5), now).await.unwrap();

    assert!(recorded.is_some());
    assert_eq!(store.all_events(1).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_tenants_are_isolated(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();
    let mut other = input("shoes", 2);
    other.tenant_id = 2;

    store.record(&input("shoes", 5), now).await.unwrap();
    store.record(&other, now).await.unwrap();

    assert_eq!(store.rollup(1, "shoes").await.unwrap().unwrap().search_count, 1);
    assert_eq!(store.rollup(2, "shoes").await.unwrap().unwrap().search_count, 1);
    assert_eq!(store.all_events(1).await.unwrap().len(), 1);
}

// --- concurrency ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_concurrent_records_lose_no_increments(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.record(&input("shoes", 0), now).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rollup = store.rollup(1, "shoes").await.unwrap().unwrap();
    assert_eq!(rollup.search_count, 10);
    assert_eq!(rollup.no_result_count, 10);
}

// --- invariants ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_no_result_count_never_exceeds_search_count(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();

    for result_count in [0, 3, 0, 0, 7, 1, 0] {
        store.record(&input("mixed", result_count), now).await.unwrap();
    }

    let rollup = store.rollup(1, "mixed").await.unwrap().unwrap();
    assert_eq!(rollup.search_count, 7);
    assert_eq!(rollup.no_result_count, 4);
    assert!(rollup.no_result_count <= rollup.search_count);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_events_and_rollups_agree_per_term(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();

    // Mixed terms, sequential and concurrent writers.
    for (query, result_count) in [("shoes", 5), ("hat", 0), ("shoes", 0), ("hat", 2)] {
        store.record(&input(query, result_count), now).await.unwrap();
    }
    let mut handles = Vec::new();
    for _ in 0..5 {
        let store = store.clone();
        handles.push(tokio::spawn(
            async move { store.record(&input("socks", 1), now).await },
        ));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // The event insert and rollup upsert land together, so the per-term
    // event count and the rollup counter can never drift apart.
    let pairs: Vec<(String, i64)> = sqlx::query_as(
        r"
        SELECT e.query, r.search_count - COUNT(e.id)
        FROM search_events e
        JOIN term_rollups r ON r.tenant_id = e.tenant_id AND r.query = e.query
        WHERE e.tenant_id = 1
        GROUP BY e.query
        ",
    )
    .fetch_all(store.pool())
    .await
    .unwrap();

    assert_eq!(pairs.len(), 3);
    for (query, drift) in pairs {
        assert_eq!(drift, 0, "rollup drift for {query}");
    }
}

// --- all_events ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_all_events_returns_newest_first(pool: SqlitePool) {
    let store = SqliteSearchStore::new(pool);
    let now = fixed_now();

    store
        .record(&input("first", 1), now - chrono::Duration::hours(2))
        .await
        .unwrap();
    store
        .record(&input("second", 1), now - chrono::Duration::hours(1))
        .await
        .unwrap();
    store.record(&input("third", 1), now).await.unwrap();

    let events = store.all_events(1).await.unwrap();
    let queries: Vec<&str> = events.iter().map(|e| e.query.as_str()).collect();
    assert_eq!(queries, ["third", "second", "first"]);
}
