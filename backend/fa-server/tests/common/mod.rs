#![allow(dead_code)]

//! Test infrastructure for fa-server API tests

use fa_auth::{JwtAlgorithm, TokenLifetimes, TokenService};
use fa_config::{FrontendConfig, OAuthClientConfig};
use fa_db::{MIGRATOR, SqliteIdentityStore};
use fa_linking::RetryConfig;
use fa_providers::{GoogleProvider, ProviderRegistry, build_http_client};
use fa_server::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use wiremock::MockServer;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes!";
pub const DASHBOARD_URL: &str = "http://frontend.test/dashboard";
pub const ERROR_URL: &str = "http://frontend.test";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    // One connection: every connection to :memory: is a separate database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");

    pool
}

pub fn test_tokens() -> TokenService {
    TokenService::new(
        JwtAlgorithm::HS256 {
            secret: TEST_SECRET.as_bytes().to_vec(),
        },
        TokenLifetimes::default(),
    )
    .expect("HS256 service")
}

fn frontend() -> FrontendConfig {
    FrontendConfig {
        dashboard_url: DASHBOARD_URL.to_string(),
        error_url: ERROR_URL.to_string(),
    }
}

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 5,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

/// AppState over an in-memory SQLite store with no OAuth providers
pub async fn create_test_app_state() -> (AppState, SqlitePool) {
    create_app_state(ProviderRegistry::new()).await
}

/// AppState with Google enabled and every Google endpoint on `server`
pub async fn create_test_app_state_with_google(server: &MockServer) -> (AppState, SqlitePool) {
    let http = build_http_client(Duration::from_secs(5)).expect("http client");
    let google = GoogleProvider::new(&google_client_config(server), http).expect("google");

    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(google));

    create_app_state(registry).await
}

async fn create_app_state(providers: ProviderRegistry) -> (AppState, SqlitePool) {
    let pool = create_test_pool().await;
    let store = Arc::new(SqliteIdentityStore::new(pool.clone()));

    let state = AppState::new(store, test_tokens(), providers, frontend(), fast_retry())
        .expect("app state");

    (state, pool)
}

pub fn google_client_config(server: &MockServer) -> OAuthClientConfig {
    let base = server.uri();
    OAuthClientConfig {
        client_id: Some("google-client".to_string()),
        client_secret: Some("google-secret".to_string()),
        redirect_uri: Some("http://localhost:5000/login/google/callback".to_string()),
        auth_url: Some(format!("{}/authorize", base)),
        token_url: Some(format!("{}/token", base)),
        userinfo_url: Some(format!("{}/userinfo", base)),
        ..Default::default()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect carries a Location header")
        .to_str()
        .unwrap()
        .to_string()
}
