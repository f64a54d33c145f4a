//! Token handlers: access-token refresh and the authenticated greeting

use crate::{
    ApiError, ApiResult, AppState, AuthenticatedUser, ProtectedResponse, RefreshRequest,
    RefreshResponse, bearer_token,
};

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};

/// POST /refresh
///
/// Mint a new access token from a refresh token sent as a bearer header,
/// or as `refresh_token` in a JSON body. The refresh token is not rotated.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<RefreshResponse>> {
    let token = match bearer_token(&headers) {
        Ok(token) => token,
        Err(header_error) => RefreshRequest::token_from_body(&body).ok_or(header_error)?,
    };

    let access_token = state.tokens.refresh(&token)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// GET /protected
///
/// Greet the token's subject. A valid token for an email with no record
/// answers 404, unlike local login which never reveals whether an account exists.
pub async fn protected(
    State(state): State<AppState>,
    AuthenticatedUser(email): AuthenticatedUser,
) -> ApiResult<Json<ProtectedResponse>> {
    let stored = state
        .store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let record = stored.record;

    Ok(Json(ProtectedResponse {
        message: format!("Hello {}", record.greeting_name()),
        oauth_providers: record.linked_providers.external(),
        email: record.email,
    }))
}
