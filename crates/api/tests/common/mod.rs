//! Shared helpers for API integration tests.
//!
//! Builds the same router/middleware stack as production (via
//! `build_app_router`) and seeds users/trips directly through the
//! repositories.

#![allow(dead_code)] // not every test file uses every helper

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use motogiro_api::auth::jwt::{generate_access_token, JwtConfig};
use motogiro_api::config::ServerConfig;
use motogiro_api::router::build_app_router;
use motogiro_api::state::AppState;
use motogiro_db::models::trip::{CreateMedia, CreateStage, CreateTrip, Trip};
use motogiro_db::models::user::{CreateUser, User};
use motogiro_db::repositories::{TripRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-jwt-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors `main.rs` so integration tests
/// exercise the same stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Seed a user with the given role and return the row.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: email.split('@').next().unwrap_or(email).to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("failed to seed user")
}

/// Mint a bearer token for a seeded user.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("failed to generate test token")
}

/// Seed a draft trip with `stage_count` fully-populated stages.
pub async fn seed_trip(pool: &PgPool, owner_id: i64, slug: &str, stage_count: usize) -> Trip {
    let stages: Vec<CreateStage> = (0..stage_count)
        .map(|i| CreateStage {
            title: format!("Tappa {}", i + 1),
            description: format!("Day {} through the passes.", i + 1),
            route: format!("Paese {} -> Paese {}", i + 1, i + 2),
        })
        .collect();

    let media = vec![CreateMedia {
        file_path: format!("trips/{slug}/cover.jpg"),
        caption: Some("Cover shot".to_string()),
    }];

    TripRepo::create(
        pool,
        &CreateTrip {
            slug: slug.to_string(),
            owner_id,
            title: slug.replace('-', " "),
            destination: "Alpi Occidentali".to_string(),
            duration_days: stage_count.max(1) as i32,
            duration_nights: stage_count.max(1) as i32,
            theme: "mountain".to_string(),
            travel_date: None,
            gpx_data: None,
        },
        &stages,
        &media,
    )
    .await
    .expect("failed to seed trip")
}

/// Send a GET request with no Authorization header.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    request(app, Method::GET, uri, None, None).await
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, Method::GET, uri, Some(token), None).await
}

/// Send a PATCH request with a bearer token and no body.
pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, Method::PATCH, uri, Some(token), None).await
}

/// Send a POST request with a bearer token and a JSON body.
pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    request(app, Method::POST, uri, Some(token), Some(body)).await
}

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    app.oneshot(request).await.expect("request failed")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body was not valid JSON")
}

/// Assert status and return the JSON body in one step.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
