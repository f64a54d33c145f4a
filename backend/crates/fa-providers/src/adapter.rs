//! Provider adapter contract.
//!
//! Every source of identity (external provider or local credentials) turns its
//! own input into the same [`IdentityAssertion`]. Adapters never write to the
//! identity store; linking happens afterwards in one place.

use crate::Result as ProviderResult;

use fa_core::{IdentityAssertion, ProviderTag};

use async_trait::async_trait;

#[async_trait]
pub trait ProviderAdapter<I: Send + 'static>: Send + Sync {
    fn tag(&self) -> ProviderTag;

    async fn resolve(&self, input: I) -> ProviderResult<IdentityAssertion>;
}

/// Authorization code received on an OAuth callback
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthorizationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthorizationCode(<redacted>)")
    }
}

/// An adapter reached through a browser redirect and an authorization code
pub trait OAuthProvider: ProviderAdapter<AuthorizationCode> {
    /// Where to send the browser to start the flow
    fn authorization_url(&self) -> String;
}
