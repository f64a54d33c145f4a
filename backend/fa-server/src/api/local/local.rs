//! Local account handlers: email + password registration and login

use crate::{
    ApiError, ApiResult, AppState, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
};

use fa_providers::{LocalCredentials, ProviderAdapter};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use log::info;

pub const MISSING_REGISTER_FIELDS: &str = "Missing required fields";
pub const MISSING_LOGIN_FIELDS: &str = "Missing email or password";

/// POST /register
///
/// Create a local account. Fails with 400 when the email is already known,
/// whichever provider created it.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let (email, password, name) = payload
        .ok()
        .and_then(|Json(request)| request.into_required())
        .ok_or_else(|| ApiError::bad_request(MISSING_REGISTER_FIELDS))?;

    let assertion = state
        .local
        .resolve(LocalCredentials::Register {
            email,
            password,
            name,
        })
        .await?;
    let email = state.linker.link(&assertion).await?;
    info!("Registered local account {}", email);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Registered Successfully")),
    ))
}

/// POST /login
///
/// Verify a local password and issue a token pair
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let (email, password) = payload
        .ok()
        .and_then(|Json(request)| request.into_required())
        .ok_or_else(|| ApiError::bad_request(MISSING_LOGIN_FIELDS))?;

    let assertion = state
        .local
        .resolve(LocalCredentials::Login { email, password })
        .await?;
    let email = state.linker.link(&assertion).await?;
    let pair = state.tokens.issue(&email)?;

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        message: "Login successful".to_string(),
    }))
}
