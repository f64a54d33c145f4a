//! LinkedIn "Sign In with LinkedIn using OpenID Connect".
//!
//! The identity token is the only source of profile data. Its signature,
//! issuer, audience and expiry are checked against LinkedIn's published key
//! set before any claim is read.

use crate::oauth_client::{OAuthClient, ProviderEndpoints};
use crate::{
    AuthorizationCode, OAuthProvider, ProviderAdapter, ProviderError, Result as ProviderResult,
    Stage,
};

use fa_config::OAuthClientConfig;
use fa_core::{IdentityAssertion, ProviderTag};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use log::{debug, warn};
use serde::Deserialize;

const LINKEDIN_AUTH_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
const LINKEDIN_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
const LINKEDIN_ISSUER: &str = "https://www.linkedin.com";
const LINKEDIN_JWKS_URL: &str = "https://www.linkedin.com/oauth/openid/jwks";

const LINKEDIN_ENDPOINTS: ProviderEndpoints = ProviderEndpoints {
    auth_url: LINKEDIN_AUTH_URL,
    token_url: LINKEDIN_TOKEN_URL,
    scopes: "openid profile email",
};

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

pub struct LinkedinProvider {
    client: OAuthClient,
    issuer: String,
    jwks_url: String,
}

impl LinkedinProvider {
    pub fn new(config: &OAuthClientConfig, http: reqwest::Client) -> ProviderResult<Self> {
        Ok(Self {
            client: OAuthClient::new(ProviderTag::Linkedin, config, LINKEDIN_ENDPOINTS, http)?,
            issuer: config
                .issuer
                .clone()
                .unwrap_or_else(|| LINKEDIN_ISSUER.to_string()),
            jwks_url: config
                .jwks_url
                .clone()
                .unwrap_or_else(|| LINKEDIN_JWKS_URL.to_string()),
        })
    }

    /// Current signing keys. Fetched per verification so key rotation on the
    /// provider side never needs a restart.
    async fn signing_keys(&self) -> ProviderResult<JwkSet> {
        let response = self
            .client
            .http()
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(ProviderTag::Linkedin, Stage::SigningKeys, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("LinkedIn key set {} answered {}", self.jwks_url, status);
            let message = format!("signing keys unavailable: {}", status);
            return Err(if status.is_server_error() {
                ProviderError::unreachable(ProviderTag::Linkedin, message)
            } else {
                ProviderError::profile_fetch(ProviderTag::Linkedin, message)
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::from_transport(ProviderTag::Linkedin, Stage::SigningKeys, e))
    }

    async fn verify_id_token(&self, id_token: &str) -> ProviderResult<IdTokenClaims> {
        let header = decode_header(id_token)
            .map_err(|e| ProviderError::identity_token(format!("malformed header: {}", e)))?;
        let kid = header
            .kid
            .ok_or_else(|| ProviderError::identity_token("token has no key id"))?;

        let keys = self.signing_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| ProviderError::identity_token(format!("unknown key id {}", kid)))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| ProviderError::identity_token(format!("unusable signing key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client.client_id()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        decode::<IdTokenClaims>(id_token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("LinkedIn identity token rejected: {}", e);
                ProviderError::identity_token(e.to_string())
            })
    }
}

#[async_trait]
impl ProviderAdapter<AuthorizationCode> for LinkedinProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Linkedin
    }

    async fn resolve(&self, code: AuthorizationCode) -> ProviderResult<IdentityAssertion> {
        let token = self.client.exchange_code(code.as_str()).await?;
        let id_token = token
            .id_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ProviderError::token_exchange(ProviderTag::Linkedin, "no identity token returned")
            })?;

        let claims = self.verify_id_token(&id_token).await?;

        let email = claims
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ProviderError::email_missing(ProviderTag::Linkedin))?;
        debug!("LinkedIn resolved {}", email);

        Ok(IdentityAssertion::new(email, ProviderTag::Linkedin)
            .with_display_name(claims.name)
            .with_external_id(Some(claims.sub)))
    }
}

impl OAuthProvider for LinkedinProvider {
    fn authorization_url(&self) -> String {
        self.client.authorization_url()
    }
}
