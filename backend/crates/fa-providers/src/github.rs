use crate::oauth_client::{OAuthClient, ProviderEndpoints};
use crate::{AuthorizationCode, OAuthProvider, ProviderAdapter, ProviderError, Result as ProviderResult};

use fa_config::OAuthClientConfig;
use fa_core::{IdentityAssertion, ProviderTag};

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

const GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";
const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

const GITHUB_ENDPOINTS: ProviderEndpoints = ProviderEndpoints {
    auth_url: GITHUB_AUTH_URL,
    token_url: GITHUB_TOKEN_URL,
    scopes: "user:email",
};

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: Option<u64>,
    email: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GithubEmail {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
}

/// GitHub OAuth2. Users may hide their email from the profile, in which case
/// it is taken from the email listing: only the entry that is both primary and
/// verified counts.
pub struct GithubProvider {
    client: OAuthClient,
    user_url: String,
    emails_url: String,
}

impl GithubProvider {
    pub fn new(config: &OAuthClientConfig, http: reqwest::Client) -> ProviderResult<Self> {
        Ok(Self {
            client: OAuthClient::new(ProviderTag::Github, config, GITHUB_ENDPOINTS, http)?,
            user_url: config
                .userinfo_url
                .clone()
                .unwrap_or_else(|| GITHUB_USER_URL.to_string()),
            emails_url: config
                .emails_url
                .clone()
                .unwrap_or_else(|| GITHUB_EMAILS_URL.to_string()),
        })
    }

    async fn primary_verified_email(&self, access_token: &str) -> ProviderResult<Option<String>> {
        let emails: Vec<GithubEmail> = self.client.fetch_json(&self.emails_url, access_token).await?;
        Ok(select_primary_verified(emails))
    }
}

pub(crate) fn select_primary_verified(emails: Vec<GithubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified && !e.email.is_empty())
        .map(|e| e.email)
}

#[async_trait]
impl ProviderAdapter<AuthorizationCode> for GithubProvider {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Github
    }

    async fn resolve(&self, code: AuthorizationCode) -> ProviderResult<IdentityAssertion> {
        let token = self.client.exchange_code(code.as_str()).await?;
        let access_token = token.access_token.unwrap_or_default();

        let user: GithubUser = self.client.fetch_json(&self.user_url, &access_token).await?;

        let email = match user.email.filter(|e| !e.trim().is_empty()) {
            Some(email) => Some(email),
            None => {
                debug!("GitHub profile has no public email, checking email list");
                self.primary_verified_email(&access_token).await?
            }
        }
        .ok_or_else(|| ProviderError::email_missing(ProviderTag::Github))?;

        Ok(IdentityAssertion::new(email, ProviderTag::Github)
            .with_display_name(user.name)
            .with_external_id(user.id.map(|id| id.to_string())))
    }
}

impl OAuthProvider for GithubProvider {
    fn authorization_url(&self) -> String {
        self.client.authorization_url()
    }
}
