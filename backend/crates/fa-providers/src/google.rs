use crate::oauth_client::{OAuthClient, ProviderEndpoints};
use crate::{AuthorizationCode, OAuthProvider, ProviderAdapter, ProviderError, Result as ProviderResult};

use fa_config::OAuthClientConfig;
use fa_core::{IdentityAssertion, ProviderTag};

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

const GOOGLE_ENDPOINTS: ProviderEndpoints = ProviderEndpoints {
    auth_url: GOOGLE_AUTH_URL,
    token_url: GOOGLE_TOKEN_URL,
    scopes: "email profile",
};

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: Option<String>,
    email: Option<String>,
    name: Option<String>,
}

/// Google OAuth2: code exchange, then the v2 userinfo endpoint
pub struct GoogleProvider {
    client: OAuthClient,
    userinfo_url: String,
}

impl GoogleProvider {
    pub fn new(config: &OAuthClientConfig, http: reqwest::Client) -> ProviderResult<Self> {
        Ok(Self {
            client: OAuthClient::new(ProviderTag::Google, config, GOOGLE_ENDPOINTS, http)?,
            userinfo_url: config
                .userinfo_url
                .clone()
                .unwrap_or_else(|| GOOGLE_USERINFO_URL.to_string()),
        })
    }
}

#[async_trait]
impl ProviderAdapter<AuthorizationCode> for GoogleProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Google
    }

    async fn resolve(&self, code: AuthorizationCode) -> ProviderResult<IdentityAssertion> {
        let token = self.client.exchange_code(code.as_str()).await?;
        let access_token = token.access_token.unwrap_or_default();

        let info: GoogleUserInfo = self
            .client
            .fetch_json(&self.userinfo_url, &access_token)
            .await?;

        let email = info
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ProviderError::email_missing(ProviderTag::Google))?;
        debug!("Google resolved {}", email);

        Ok(IdentityAssertion::new(email, ProviderTag::Google)
            .with_display_name(info.name)
            .with_external_id(info.id))
    }
}

impl OAuthProvider for GoogleProvider {
    fn authorization_url(&self) -> String {
        self.client.authorization_url()
    }
}
