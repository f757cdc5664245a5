//! Integration tests for the trip lifecycle endpoints: publish, submit,
//! archive, and the concurrency behaviour of the status commit.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get_auth, patch_auth, seed_trip, seed_user, token_for};
use motogiro_core::status::{STATUS_ARCHIVED, STATUS_DRAFT, STATUS_PENDING_REVIEW, STATUS_PUBLISHED};
use motogiro_db::repositories::TripRepo;
use sqlx::{ConnectOptions, Connection, PgPool};

// ---------------------------------------------------------------------------
// Publish: validation gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_with_zero_stages_returns_400_with_stage_error(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-vuoto", 0).await;
    let token = token_for(&ranger);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/trips/{}/publish", trip.id), &token).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["code"], "VALIDATION_FAILED");
    let errors = json["validation_errors"].as_array().unwrap();
    assert!(
        errors.iter().any(|e| e.as_str().unwrap().contains("stages")),
        "expected a stages-missing error, got: {errors:?}"
    );

    // The draft must not have moved.
    let row = TripRepo::find_by_id(&pool, trip.id).await.unwrap().unwrap();
    assert_eq!(row.status, STATUS_DRAFT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_publishes_valid_draft(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-delle-dolomiti", 2).await;
    let token = token_for(&ranger);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/trips/{}/publish", trip.id), &token).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["data"]["status"], STATUS_PUBLISHED);
    assert_eq!(json["data"]["slug"], "giro-delle-dolomiti");

    let row = TripRepo::find_by_id(&pool, trip.id).await.unwrap().unwrap();
    assert_eq!(row.status, STATUS_PUBLISHED);
}

// ---------------------------------------------------------------------------
// Publish: authorization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn non_owner_ranger_gets_403(pool: PgPool) {
    let owner = seed_user(&pool, "owner@motogiro.it", "ranger").await;
    let other = seed_user(&pool, "other@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, owner.id, "giro-riservato", 2).await;
    let token = token_for(&other);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/trips/{}/publish", trip.id), &token).await;
    let json = expect_json(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");

    let row = TripRepo::find_by_id(&pool, trip.id).await.unwrap().unwrap();
    assert_eq!(row.status, STATUS_DRAFT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sentinel_publishes_any_valid_draft(pool: PgPool) {
    let owner = seed_user(&pool, "owner@motogiro.it", "ranger").await;
    let sentinel = seed_user(&pool, "sentinel@motogiro.it", "sentinel").await;
    let trip = seed_trip(&pool, owner.id, "giro-supervisionato", 2).await;
    let token = token_for(&sentinel);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/trips/{}/publish", trip.id), &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], STATUS_PUBLISHED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn explorer_cannot_publish_even_unowned_content(pool: PgPool) {
    let owner = seed_user(&pool, "owner@motogiro.it", "ranger").await;
    let explorer = seed_user(&pool, "explorer@motogiro.it", "explorer").await;
    let trip = seed_trip(&pool, owner.id, "giro-in-vetrina", 2).await;
    let token = token_for(&explorer);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/trips/{}/publish", trip.id), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unauthenticated_publish_returns_401(pool: PgPool) {
    let owner = seed_user(&pool, "owner@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, owner.id, "giro-anonimo", 2).await;

    let app = common::build_test_app(pool.clone());
    let response = common::get(app.clone(), &format!("/api/v1/trips/{}/validate", trip.id)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Submit and archive
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_skips_the_validation_gate(pool: PgPool) {
    // A draft with zero stages can still be sent for review.
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-in-lavorazione", 0).await;
    let token = token_for(&ranger);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/trips/{}/submit", trip.id), &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], STATUS_PENDING_REVIEW);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn archive_is_terminal(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-concluso", 2).await;
    let token = token_for(&ranger);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(
        app.clone(),
        &format!("/api/v1/trips/{}/archive", trip.id),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], STATUS_ARCHIVED);

    // No transition leads out of Archived, even a publish of valid content.
    let response = patch_auth(app, &format!("/api/v1/trips/{}/publish", trip.id), &token).await;
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publishing_twice_is_an_invalid_transition(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-ripetuto", 2).await;
    let token = token_for(&ranger);

    let app = common::build_test_app(pool.clone());
    let first = patch_auth(
        app.clone(),
        &format!("/api/v1/trips/{}/publish", trip.id),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = patch_auth(app, &format!("/api/v1/trips/{}/publish", trip.id), &token).await;
    let json = expect_json(second, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_trip_returns_404(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let token = token_for(&ranger);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, "/api/v1/trips/999999/publish", &token).await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Optimistic concurrency at the commit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn conditional_write_refuses_a_stale_expected_status(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-conteso", 2).await;

    // First writer wins.
    let winner =
        TripRepo::update_status_where_current(&pool, trip.id, STATUS_ARCHIVED, STATUS_DRAFT)
            .await
            .unwrap();
    assert!(winner.is_some());

    // A second writer holding the same (now stale) snapshot must be
    // refused: the same committed transition never applies twice.
    let loser =
        TripRepo::update_status_where_current(&pool, trip.id, STATUS_PUBLISHED, STATUS_DRAFT)
            .await
            .unwrap();
    assert!(loser.is_none(), "stale conditional write must not commit");

    let row = TripRepo::find_by_id(&pool, trip.id).await.unwrap().unwrap();
    assert_eq!(row.status, STATUS_ARCHIVED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stale_publish_returns_409_concurrent_modification(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-in-gara", 2).await;
    let token = token_for(&ranger);

    // The competing writer gets its own connection so it cannot starve
    // the pool the request runs on. It holds a row lock so the publish
    // request takes its Draft snapshot but parks at the conditional
    // UPDATE.
    let mut writer = (*pool.connect_options()).clone().connect().await.unwrap();
    let mut tx = writer.begin().await.unwrap();
    sqlx::query("SELECT id FROM trips WHERE id = $1 FOR UPDATE")
        .bind(trip.id)
        .fetch_one(&mut *tx)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/trips/{}/publish", trip.id);
    let publish = tokio::spawn(async move { patch_auth(app, &uri, &token).await });

    // Give the request time to read the snapshot and queue behind the
    // lock, then let a competing writer archive the trip.
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    sqlx::query("UPDATE trips SET status = $2, updated_at = now() WHERE id = $1")
        .bind(trip.id)
        .bind(STATUS_ARCHIVED)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let response = publish.await.unwrap();
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONCURRENT_MODIFICATION");

    let row = TripRepo::find_by_id(&pool, trip.id).await.unwrap().unwrap();
    assert_eq!(row.status, STATUS_ARCHIVED);
}

// ---------------------------------------------------------------------------
// Transition results carry the updated summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn successful_transition_returns_updated_summary(pool: PgPool) {
    let ranger = seed_user(&pool, "ranger@motogiro.it", "ranger").await;
    let trip = seed_trip(&pool, ranger.id, "giro-lampo", 1).await;
    let token = token_for(&ranger);

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &format!("/api/v1/trips/{}/submit", trip.id), &token).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["data"]["id"], trip.id);
    assert_eq!(json["data"]["slug"], "giro-lampo");
    assert!(json["data"]["updated_at"].is_string());
}

// ---------------------------------------------------------------------------
// Sanity: GET /trips/{id} visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn draft_hidden_from_strangers_until_published(pool: PgPool) {
    let owner = seed_user(&pool, "owner@motogiro.it", "ranger").await;
    let reader = seed_user(&pool, "reader@motogiro.it", "explorer").await;
    let trip = seed_trip(&pool, owner.id, "giro-segreto", 2).await;
    let reader_token = token_for(&reader);
    let owner_token = token_for(&owner);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/trips/{}", trip.id);

    let response = get_auth(app.clone(), &uri, &reader_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_auth(
        app.clone(),
        &format!("/api/v1/trips/{}/publish", trip.id),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &reader_token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], STATUS_PUBLISHED);
    assert_eq!(json["data"]["stages"].as_array().unwrap().len(), 2);
}
