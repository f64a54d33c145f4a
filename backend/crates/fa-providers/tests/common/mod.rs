#![allow(dead_code)]

use fa_config::OAuthClientConfig;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const CLIENT_ID: &str = "test-client-id";
pub const SIGNING_KID: &str = "test-key-1";
pub const ISSUER: &str = "https://www.linkedin.com";

const RSA_PRIVATE_PEM: &str = include_str!("../fixtures/rsa_private.pem");
const JWKS_JSON: &str = include_str!("../fixtures/jwks.json");

/// Client registration pointing every endpoint at the mock server
pub fn mock_client_config(server: &MockServer) -> OAuthClientConfig {
    let base = server.uri();
    OAuthClientConfig {
        client_id: Some(CLIENT_ID.to_string()),
        client_secret: Some("test-client-secret".to_string()),
        redirect_uri: Some("http://localhost:5000/login/test/callback".to_string()),
        auth_url: Some(format!("{}/authorize", base)),
        token_url: Some(format!("{}/token", base)),
        userinfo_url: Some(format!("{}/userinfo", base)),
        emails_url: Some(format!("{}/emails", base)),
        issuer: Some(ISSUER.to_string()),
        jwks_url: Some(format!("{}/jwks", base)),
    }
}

pub fn jwks() -> Value {
    serde_json::from_str(JWKS_JSON).expect("jwks fixture is valid JSON")
}

/// Identity token claims as LinkedIn issues them, valid for an hour
pub fn id_token_claims(email: Option<&str>) -> Value {
    let now = Utc::now().timestamp();
    let mut claims = json!({
        "iss": ISSUER,
        "aud": CLIENT_ID,
        "sub": "li-782bbtaQ",
        "name": "Ann Example",
        "iat": now,
        "exp": now + 3600,
    });
    if let Some(email) = email {
        claims["email"] = json!(email);
    }
    claims
}

/// Sign `claims` with the fixture key, advertising `kid`
pub fn sign_id_token(claims: &Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).expect("fixture key");
    encode(&header, claims, &key).expect("signing succeeds")
}
