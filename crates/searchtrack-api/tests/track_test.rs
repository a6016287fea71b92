//! Integration tests for the ingestion endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_track_records_event_and_rollup(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());

    let (status, body) = common::post_json(
        app,
        "/api/v1/track",
        &json!({"query": "running shoes", "resultCount": 5, "actorId": 7}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["recorded"], true);

    let (query, count): (String, i64) = sqlx::query_as(
        "SELECT query, search_count FROM term_rollups WHERE tenant_id = 1",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(query, "running shoes");
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_track_requires_no_token(pool: SqlitePool) {
    // Ingestion comes from the search-serving path, not the dashboard; it
    // carries no token and must still be accepted.
    let app = common::build_test_app(pool);

    let (status, body) =
        common::post_json(app, "/api/v1/track", &json!({"query": "hat"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_track_accepts_minimal_payload(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());

    let (status, body) = common::post_json(app, "/api/v1/track", &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"], true);

    let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_events")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(events, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_track_reports_success_even_when_invalid(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());

    let (status, body) = common::post_json(
        app,
        "/api/v1/track",
        &json!({"query": "shoes", "resultCount": -3}),
    )
    .await;

    // The collaborator must never see a failure; only `recorded` reveals it.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["recorded"], false);

    let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_events")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(events, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_track_honors_disabled_tracking(pool: SqlitePool) {
    sqlx::query(
        "INSERT INTO tracker_settings (tenant_id, name, value) VALUES (1, 'tracking_enabled', '0')",
    )
    .execute(&pool)
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone());

    let (status, body) =
        common::post_json(app, "/api/v1/track", &json!({"query": "shoes"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["recorded"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_click_attaches_to_recent_search(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    common::post_json(
        app.clone(),
        "/api/v1/track",
        &json!({"query": "shoes", "resultCount": 5, "actorId": 7}),
    )
    .await;

    let (status, body) = common::post_json(
        app,
        "/api/v1/click",
        &json!({"actorId": 7, "clickedResultId": 301}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["attached"], true);

    let clicked: Option<i64> =
        sqlx::query_scalar("SELECT clicked_result_id FROM search_events WHERE actor_id = 7")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(clicked, Some(301));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_click_without_candidate_still_succeeds(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let (status, body) = common::post_json(
        app,
        "/api/v1/click",
        &json!({"actorId": 7, "clickedResultId": 301}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["attached"], false);
}
