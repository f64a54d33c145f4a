//! Axum extractors for bearer-token authentication

use crate::{ApiError, AppState};

use fa_auth::AuthError;

use std::future::Future;
use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use error_location::ErrorLocation;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the raw token out of `Authorization: Bearer <token>`
#[track_caller]
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let caller = Location::caller();
    let invalid_scheme = || AuthError::InvalidScheme {
        location: ErrorLocation::from(caller),
    };

    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::MissingHeader {
            location: ErrorLocation::from(caller),
        })?
        .to_str()
        .map_err(|_| invalid_scheme())?;

    match value.strip_prefix(BEARER_PREFIX).map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(invalid_scheme()),
    }
}

/// Email of the caller, taken from a valid access token
///
/// Rejects with `401` when the header is missing, the token is expired,
/// or the token fails verification.
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = bearer_token(&parts.headers)?;
            let subject = state.tokens.authorize(&token)?;
            log::debug!("Authenticated request for {}", subject);

            Ok(AuthenticatedUser(subject))
        }
    }
}
