mod common;

use common::{SIGNING_KID, id_token_claims, jwks, mock_client_config, sign_id_token};

use fa_core::ProviderTag;
use fa_providers::{
    AuthorizationCode, LinkedinProvider, ProviderAdapter, ProviderError, build_http_client,
};

use std::time::Duration;

use chrono::Utc;
use googletest::prelude::*;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mock_linkedin(id_token: Option<String>) -> MockServer {
    let server = MockServer::start().await;

    let mut body = json!({
        "access_token": "li-access",
        "expires_in": 5183999,
        "scope": "email,openid,profile",
        "token_type": "Bearer"
    });
    if let Some(id_token) = id_token {
        body["id_token"] = json!(id_token);
    }
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jwks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks()))
        .mount(&server)
        .await;

    server
}

async fn resolve(server: &MockServer) -> fa_providers::Result<fa_core::IdentityAssertion> {
    let http = build_http_client(Duration::from_secs(5)).unwrap();
    LinkedinProvider::new(&mock_client_config(server), http)
        .unwrap()
        .resolve(AuthorizationCode::new("li-code"))
        .await
}

#[tokio::test]
async fn given_valid_id_token_when_resolved_then_claims_become_assertion() {
    let token = sign_id_token(&id_token_claims(Some("a@x.com")), Some(SIGNING_KID));
    let server = mock_linkedin(Some(token)).await;

    let assertion = resolve(&server).await.unwrap();

    assert_that!(assertion.email, eq("a@x.com"));
    assert_that!(assertion.provider, eq(ProviderTag::Linkedin));
    assert_eq!(assertion.display_name.as_deref(), Some("Ann Example"));
    assert_eq!(assertion.external_id.as_deref(), Some("li-782bbtaQ"));
}

#[tokio::test]
async fn given_missing_id_token_when_resolved_then_exchange_failed() {
    let server = mock_linkedin(None).await;

    let result = resolve(&server).await;

    assert!(matches!(result, Err(ProviderError::TokenExchangeFailed { .. })));
}

#[tokio::test]
async fn given_wrong_audience_when_resolved_then_identity_token_invalid() {
    let mut claims = id_token_claims(Some("a@x.com"));
    claims["aud"] = json!("someone-else");
    let server = mock_linkedin(Some(sign_id_token(&claims, Some(SIGNING_KID)))).await;

    let result = resolve(&server).await;

    assert!(matches!(result, Err(ProviderError::IdentityTokenInvalid { .. })));
}

#[tokio::test]
async fn given_wrong_issuer_when_resolved_then_identity_token_invalid() {
    let mut claims = id_token_claims(Some("a@x.com"));
    claims["iss"] = json!("https://evil.example.com");
    let server = mock_linkedin(Some(sign_id_token(&claims, Some(SIGNING_KID)))).await;

    let result = resolve(&server).await;

    assert!(matches!(result, Err(ProviderError::IdentityTokenInvalid { .. })));
}

#[tokio::test]
async fn given_expired_id_token_when_resolved_then_identity_token_invalid() {
    let mut claims = id_token_claims(Some("a@x.com"));
    let past = Utc::now().timestamp() - 7200;
    claims["iat"] = json!(past);
    claims["exp"] = json!(past + 600);
    let server = mock_linkedin(Some(sign_id_token(&claims, Some(SIGNING_KID)))).await;

    let result = resolve(&server).await;

    assert!(matches!(result, Err(ProviderError::IdentityTokenInvalid { .. })));
}

#[tokio::test]
async fn given_unknown_key_id_when_resolved_then_identity_token_invalid() {
    let token = sign_id_token(&id_token_claims(Some("a@x.com")), Some("rotated-away"));
    let server = mock_linkedin(Some(token)).await;

    let result = resolve(&server).await;

    assert!(matches!(result, Err(ProviderError::IdentityTokenInvalid { .. })));
}

#[tokio::test]
async fn given_token_without_key_id_when_resolved_then_identity_token_invalid() {
    let token = sign_id_token(&id_token_claims(Some("a@x.com")), None);
    let server = mock_linkedin(Some(token)).await;

    let result = resolve(&server).await;

    assert!(matches!(result, Err(ProviderError::IdentityTokenInvalid { .. })));
}

#[tokio::test]
async fn given_tampered_payload_when_resolved_then_identity_token_invalid() {
    let token = sign_id_token(&id_token_claims(Some("a@x.com")), Some(SIGNING_KID));
    let forged = sign_id_token(&id_token_claims(Some("mallory@x.com")), Some(SIGNING_KID));
    let parts: Vec<&str> = token.split('.').collect();
    let forged_parts: Vec<&str> = forged.split('.').collect();
    let tampered = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);
    let server = mock_linkedin(Some(tampered)).await;

    let result = resolve(&server).await;

    assert!(matches!(result, Err(ProviderError::IdentityTokenInvalid { .. })));
}

#[tokio::test]
async fn given_verified_token_without_email_when_resolved_then_email_missing() {
    let token = sign_id_token(&id_token_claims(None), Some(SIGNING_KID));
    let server = mock_linkedin(Some(token)).await;

    let result = resolve(&server).await;

    assert!(matches!(
        result,
        Err(ProviderError::EmailMissing { provider: ProviderTag::Linkedin, .. })
    ));
}
