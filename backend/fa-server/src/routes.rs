use crate::{AppState, authorize_redirect, callback, health, login, protected, refresh, register};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Local accounts
        .route("/register", post(register))
        .route("/login", post(login))
        // Tokens
        .route("/refresh", post(refresh))
        .route("/protected", get(protected))
        // OAuth providers
        .route("/login/{provider}", get(authorize_redirect))
        .route("/login/{provider}/callback", get(callback))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        // The browser frontend is served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
