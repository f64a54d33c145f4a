//! OAuth handlers: redirect to a provider, then finish the login on callback.
//!
//! Callback failures never surface as JSON. The browser is always sent to
//! the frontend, either the dashboard with tokens in the fragment or the
//! error page with a readable message.

use crate::{ApiError, ApiResult, AppState, CallbackQuery};

use fa_auth::TokenPair;
use fa_core::ProviderTag;
use fa_providers::{AuthorizationCode, OAuthProvider, ProviderAdapter};

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use log::{error, info, warn};

pub const MISSING_CODE_MESSAGE: &str = "Missing authorization code";

/// GET /login/{provider}
///
/// Redirect the browser to the provider's consent page
pub async fn authorize_redirect(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> ApiResult<Redirect> {
    let provider = lookup_provider(&state, &provider)?;
    Ok(Redirect::to(&provider.authorization_url()))
}

/// GET /login/{provider}/callback
///
/// Exchange the code, link the asserted identity and hand tokens to the frontend
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let provider = match lookup_provider(&state, &provider) {
        Ok(provider) => provider,
        Err(e) => return e.into_response(),
    };
    let tag = provider.tag();

    let Some(code) = query.authorization_code() else {
        if let Some(ref denied) = query.error {
            warn!(
                "{} callback returned error '{}': {}",
                tag,
                denied,
                query.error_description.as_deref().unwrap_or("")
            );
        }
        return error_redirect(&state, MISSING_CODE_MESSAGE);
    };

    match complete_login(&state, provider.as_ref(), code).await {
        Ok(pair) => {
            let target = format!(
                "{}#access_token={}&refresh_token={}",
                state.frontend.dashboard_url, pair.access_token, pair.refresh_token
            );
            Redirect::to(&target).into_response()
        }
        Err(reason) => error_redirect(
            &state,
            &format!("{} login failed: {}", tag.display_name(), reason),
        ),
    }
}

/// Provider adapter, then linking engine, then token issuance.
/// Errors come back as a short reason fit for the error page.
async fn complete_login(
    state: &AppState,
    provider: &dyn OAuthProvider,
    code: &str,
) -> Result<TokenPair, String> {
    let assertion = provider
        .resolve(AuthorizationCode::new(code))
        .await
        .map_err(|e| {
            warn!("{}", e);
            e.user_message()
        })?;

    let email = state.linker.link(&assertion).await.map_err(|e| {
        error!("{}", e);
        "account could not be saved".to_string()
    })?;

    let pair = state.tokens.issue(&email).map_err(|e| {
        error!("{}", e);
        "internal error".to_string()
    })?;

    info!("{} login completed for {}", provider.tag(), email);
    Ok(pair)
}

fn lookup_provider(state: &AppState, name: &str) -> ApiResult<Arc<dyn OAuthProvider>> {
    ProviderTag::from_str(name)
        .ok()
        .and_then(|tag| state.providers.get(tag))
        .ok_or_else(|| ApiError::not_found(format!("Unknown provider: {}", name)))
}

fn error_redirect(state: &AppState, message: &str) -> Response {
    let target = format!(
        "{}?message={}",
        state.frontend.error_url,
        urlencoding::encode(message)
    );
    Redirect::to(&target).into_response()
}
