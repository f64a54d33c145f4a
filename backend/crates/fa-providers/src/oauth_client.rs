//! Authorization-code plumbing shared by every external provider: the
//! redirect URL, the code-for-token exchange, and authenticated JSON fetches.

use crate::{ProviderError, Result as ProviderResult, Stage};

use fa_config::OAuthClientConfig;
use fa_core::ProviderTag;

use std::panic::Location;

use error_location::ErrorLocation;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Well-known endpoints and scopes of one provider
#[derive(Debug, Clone, Copy)]
pub struct ProviderEndpoints {
    pub auth_url: &'static str,
    pub token_url: &'static str,
    pub scopes: &'static str,
}

/// Token endpoint response. Providers report some failures with a 200 and an
/// `error` field instead of an access token.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    /// OpenID Connect identity token
    pub id_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

pub struct OAuthClient {
    provider: ProviderTag,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
    scopes: &'static str,
    http: reqwest::Client,
}

impl OAuthClient {
    /// Resolve a client registration against the provider's default endpoints
    #[track_caller]
    pub fn new(
        provider: ProviderTag,
        config: &OAuthClientConfig,
        endpoints: ProviderEndpoints,
        http: reqwest::Client,
    ) -> ProviderResult<Self> {
        let not_configured = || ProviderError::NotConfigured {
            provider,
            location: ErrorLocation::from(Location::caller()),
        };

        let client_id = config.client_id.clone().ok_or_else(not_configured)?;
        let client_secret = config.client_secret.clone().ok_or_else(not_configured)?;
        let redirect_uri = config.redirect_uri.clone().ok_or_else(not_configured)?;

        Ok(Self {
            provider,
            client_id,
            client_secret,
            redirect_uri,
            auth_url: config
                .auth_url
                .clone()
                .unwrap_or_else(|| endpoints.auth_url.to_string()),
            token_url: config
                .token_url
                .clone()
                .unwrap_or_else(|| endpoints.token_url.to_string()),
            scopes: endpoints.scopes,
            http,
        })
    }

    pub fn provider(&self) -> ProviderTag {
        self.provider
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn authorization_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(self.scopes),
        )
    }

    /// POST the authorization code to the token endpoint.
    /// The returned response is guaranteed to carry an access token.
    pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenResponse> {
        debug!("Exchanging authorization code with {}", self.provider);

        let response = self
            .http
            .post(&self.token_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(self.provider, Stage::TokenExchange, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} token endpoint answered {}", self.provider, status);
            return Err(ProviderError::token_exchange(
                self.provider,
                format!("token endpoint returned {}", status),
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::from_transport(self.provider, Stage::TokenExchange, e))?;

        if token.access_token.as_deref().is_none_or(str::is_empty) {
            let reason = token
                .error_description
                .as_deref()
                .or(token.error.as_deref())
                .unwrap_or("no access token returned");
            warn!("{} token exchange returned no access token: {}", self.provider, reason);
            return Err(ProviderError::token_exchange(self.provider, reason));
        }

        Ok(token)
    }

    /// GET a JSON resource with the provider access token
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> ProviderResult<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(self.provider, Stage::Profile, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} profile endpoint {} answered {}", self.provider, url, status);
            return Err(ProviderError::profile_fetch(
                self.provider,
                format!("{} returned {}", url, status),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::from_transport(self.provider, Stage::Profile, e))
    }
}
