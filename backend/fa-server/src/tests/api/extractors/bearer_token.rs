use crate::tests::{create_test_state, hs256_tokens};
use crate::{ApiError, AuthenticatedUser, bearer_token};

use fa_auth::{AuthError, TokenLifetimes};

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, Request, header::AUTHORIZATION},
};
use googletest::prelude::*;

fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

async fn extract(state: &crate::AppState, authorization: Option<&str>) -> Result<AuthenticatedUser, ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let (mut parts, _body) = builder.body(Body::empty()).unwrap().into_parts();
    AuthenticatedUser::from_request_parts(&mut parts, state).await
}

#[test]
fn given_bearer_header_when_parsed_then_token_returned() {
    let token = bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap();

    assert_that!(token, eq("abc.def.ghi"));
}

#[test]
fn given_no_header_when_parsed_then_missing_header() {
    let result = bearer_token(&HeaderMap::new());

    assert!(matches!(result, Err(AuthError::MissingHeader { .. })));
}

#[test]
fn given_basic_scheme_when_parsed_then_invalid_scheme() {
    let result = bearer_token(&headers_with("Basic dXNlcjpwdw=="));

    assert!(matches!(result, Err(AuthError::InvalidScheme { .. })));
}

#[test]
fn given_empty_bearer_when_parsed_then_invalid_scheme() {
    let result = bearer_token(&headers_with("Bearer   "));

    assert!(matches!(result, Err(AuthError::InvalidScheme { .. })));
}

#[tokio::test]
async fn given_valid_access_token_when_extracted_then_subject_returned() {
    let state = create_test_state();
    let pair = state.tokens.issue("a@x.com").unwrap();

    let user = extract(&state, Some(&format!("Bearer {}", pair.access_token)))
        .await
        .unwrap();

    assert_that!(user.0, eq("a@x.com"));
}

#[tokio::test]
async fn given_refresh_token_when_extracted_then_rejected_as_invalid() {
    let state = create_test_state();
    let pair = state.tokens.issue("a@x.com").unwrap();

    let result = extract(&state, Some(&format!("Bearer {}", pair.refresh_token))).await;

    assert!(matches!(
        result,
        Err(ApiError::Token {
            code: "invalid_token",
            ..
        })
    ));
}

#[tokio::test]
async fn given_token_from_other_secret_when_extracted_then_rejected() {
    let state = create_test_state();
    let foreign = fa_auth::TokenService::new(
        fa_auth::JwtAlgorithm::HS256 {
            secret: b"another-secret-that-is-long-enough".to_vec(),
        },
        TokenLifetimes::default(),
    )
    .unwrap();
    let pair = foreign.issue("a@x.com").unwrap();

    let result = extract(&state, Some(&format!("Bearer {}", pair.access_token))).await;

    assert!(matches!(
        result,
        Err(ApiError::Token {
            code: "invalid_token",
            ..
        })
    ));
}

#[tokio::test]
async fn given_expired_access_token_when_extracted_then_token_expired() {
    let state = create_test_state();
    let expired = hs256_tokens(TokenLifetimes {
        access_ttl_secs: -120,
        refresh_ttl_secs: 60,
        leeway_secs: 0,
    })
    .issue("a@x.com")
    .unwrap();

    let result = extract(&state, Some(&format!("Bearer {}", expired.access_token))).await;

    assert!(matches!(
        result,
        Err(ApiError::Token {
            code: "token_expired",
            ..
        })
    ));
}

#[tokio::test]
async fn given_no_header_when_extracted_then_authorization_required() {
    let state = create_test_state();

    let result = extract(&state, None).await;

    assert!(matches!(
        result,
        Err(ApiError::Token {
            code: "authorization_required",
            ..
        })
    ));
}
