use crate::{ConfigError, ConfigErrorResult, DEFAULT_HTTP_TIMEOUT_SECS, MAX_HTTP_TIMEOUT_SECS};

use serde::Deserialize;

/// Credentials for the external identity providers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Upper bound for every outbound provider call
    pub http_timeout_secs: u64,
    pub google: OAuthClientConfig,
    pub github: OAuthClientConfig,
    pub linkedin: OAuthClientConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            google: OAuthClientConfig::default(),
            github: OAuthClientConfig::default(),
            linkedin: OAuthClientConfig::default(),
        }
    }
}

impl ProvidersConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.http_timeout_secs == 0 || self.http_timeout_secs > MAX_HTTP_TIMEOUT_SECS {
            return Err(ConfigError::provider(format!(
                "providers.http_timeout_secs must be 1-{}, got {}",
                MAX_HTTP_TIMEOUT_SECS, self.http_timeout_secs
            )));
        }

        self.google.validate("google")?;
        self.github.validate("github")?;
        self.linkedin.validate("linkedin")?;

        Ok(())
    }

    /// Names of providers with a configured client id
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("google", &self.google),
            ("github", &self.github),
            ("linkedin", &self.linkedin),
        ]
        .into_iter()
        .filter(|(_, client)| client.is_enabled())
        .map(|(name, _)| name)
        .collect()
    }
}

/// One OAuth2 / OpenID Connect client registration.
///
/// Endpoint fields override the provider's well-known endpoints and are
/// normally left unset.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct OAuthClientConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub auth_url: Option<String>,
    pub token_url: Option<String>,
    pub userinfo_url: Option<String>,
    /// GitHub only: verified email listing
    pub emails_url: Option<String>,
    /// OpenID Connect only: expected `iss` claim
    pub issuer: Option<String>,
    /// OpenID Connect only: signing key set
    pub jwks_url: Option<String>,
}

impl OAuthClientConfig {
    pub fn is_enabled(&self) -> bool {
        self.client_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    fn validate(&self, provider: &str) -> ConfigErrorResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        if self.client_secret.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::provider(format!(
                "providers.{}.client_secret is required when client_id is set",
                provider
            )));
        }

        match self.redirect_uri.as_deref() {
            Some(uri) if uri.starts_with("http://") || uri.starts_with("https://") => Ok(()),
            _ => Err(ConfigError::provider(format!(
                "providers.{}.redirect_uri must be an http(s) URL when client_id is set",
                provider
            ))),
        }
    }
}

impl std::fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("emails_url", &self.emails_url)
            .field("issuer", &self.issuer)
            .field("jwks_url", &self.jwks_url)
            .finish()
    }
}
