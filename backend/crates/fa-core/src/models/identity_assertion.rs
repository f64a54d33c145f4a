//! Identity assertion - one source's claim about who owns an email.

use crate::ProviderTag;

/// Canonical output of every provider adapter
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityAssertion {
    pub email: String,
    pub display_name: Option<String>,
    pub provider: ProviderTag,
    /// Provider-issued subject identifier, when the provider supplies one
    pub external_id: Option<String>,
    /// Present only for a local registration
    pub password_hash: Option<String>,
}

impl IdentityAssertion {
    pub fn new(email: impl Into<String>, provider: ProviderTag) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            provider,
            external_id: None,
            password_hash: None,
        }
    }

    /// Set the display name. Blank names are treated as absent.
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    pub fn with_external_id(mut self, external_id: Option<String>) -> Self {
        self.external_id = external_id.filter(|id| !id.is_empty());
        self
    }

    pub fn with_password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    /// A registration may create an account but never merge into one
    pub fn is_registration(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl std::fmt::Debug for IdentityAssertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityAssertion")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("provider", &self.provider)
            .field("external_id", &self.external_id)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
