use crate::ApiError;

use fa_auth::{AuthError, TokenType};
use fa_db::DbError;
use fa_linking::LinkError;
use fa_providers::ProviderError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[tokio::test]
async fn given_bad_request_when_rendered_then_flat_error_body() {
    let (status, json) = body_json(ApiError::bad_request("Missing required fields")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({ "error": "Missing required fields" }));
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_details_hidden() {
    let (status, json) = body_json(ApiError::internal("sqlite: disk I/O error")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert!(!json.to_string().contains("sqlite"));
}

#[tokio::test]
async fn given_expired_token_when_converted_then_token_expired_body() {
    let error = ApiError::from(AuthError::TokenExpired { location: here() });
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "token_expired");
    assert_eq!(json["message"], "The access token has expired");
}

#[tokio::test]
async fn given_wrong_token_type_when_converted_then_invalid_token_body() {
    let error = ApiError::from(AuthError::WrongTokenType {
        expected: TokenType::Refresh,
        actual: TokenType::Access,
        location: here(),
    });
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid_token");
    assert_eq!(json["message"], "Signature verification failed");
}

#[tokio::test]
async fn given_missing_header_when_converted_then_authorization_required() {
    let error = ApiError::from(AuthError::MissingHeader { location: here() });
    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "authorization_required");
}

#[tokio::test]
async fn given_signing_key_failure_when_converted_then_internal() {
    let error = ApiError::from(AuthError::InvalidKey {
        message: "bad pem".into(),
        location: here(),
    });

    assert!(matches!(error, ApiError::Internal { .. }));
}

#[tokio::test]
async fn given_invalid_credentials_when_converted_then_generic_401() {
    let (status, json) = body_json(ApiError::from(ProviderError::invalid_credentials())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid email or password");
}

#[tokio::test]
async fn given_duplicate_account_when_converted_then_user_already_exists() {
    let from_provider = ApiError::from(ProviderError::DuplicateAccount {
        email: "a@x.com".into(),
        location: here(),
    });
    let from_linker = ApiError::from(LinkError::duplicate("a@x.com"));

    for error in [from_provider, from_linker] {
        let (status, json) = body_json(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "User already exists");
    }
}

#[tokio::test]
async fn given_store_failures_when_converted_then_service_unavailable() {
    let errors = [
        ApiError::from(LinkError::unavailable("pool timed out")),
        ApiError::from(DbError::conflict("a@x.com")),
        ApiError::from(ProviderError::from(DbError::corrupt("a@x.com", "bad json"))),
    ];

    for error in errors {
        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

#[test]
fn given_unexpected_provider_error_when_converted_then_internal() {
    let error = ApiError::from(ProviderError::hashing("argon2 failed"));

    assert!(matches!(error, ApiError::Internal { .. }));
}
