//! Email + password credentials held by this service.

use crate::password::{hash_blocking, hash_password, verify_password};
use crate::{ProviderAdapter, ProviderError, Result as ProviderResult};

use fa_core::{IdentityAssertion, ProviderTag};
use fa_db::IdentityStore;

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{debug, info};

/// Input of the local adapter
#[derive(Clone)]
pub enum LocalCredentials {
    Register {
        email: String,
        password: String,
        name: String,
    },
    Login {
        email: String,
        password: String,
    },
}

impl std::fmt::Debug for LocalCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register { email, name, .. } => f
                .debug_struct("Register")
                .field("email", email)
                .field("name", name)
                .finish_non_exhaustive(),
            Self::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .finish_non_exhaustive(),
        }
    }
}

/// Registration yields an assertion carrying a fresh password hash; login
/// yields a plain assertion once the password matches. The store is only read.
pub struct LocalAdapter {
    store: Arc<dyn IdentityStore>,
    /// Verified against when there is no real hash, so unknown accounts cost
    /// the same as wrong passwords
    dummy_hash: String,
}

impl LocalAdapter {
    pub fn new(store: Arc<dyn IdentityStore>) -> ProviderResult<Self> {
        let dummy_hash = hash_blocking("fedauth-dummy-password")?;
        Ok(Self { store, dummy_hash })
    }

    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> ProviderResult<IdentityAssertion> {
        if self.store.find_by_email(&email).await?.is_some() {
            debug!("Registration rejected, {} already exists", email);
            return Err(duplicate(&email));
        }

        let password_hash = hash_password(password).await?;
        info!("Prepared local registration for {}", email);

        Ok(IdentityAssertion::new(email, ProviderTag::Local)
            .with_display_name(Some(name))
            .with_password_hash(password_hash))
    }

    async fn login(&self, email: String, password: String) -> ProviderResult<IdentityAssertion> {
        let stored_hash = self
            .store
            .find_by_email(&email)
            .await?
            .and_then(|stored| stored.record.password_hash);

        let matched = match stored_hash {
            Some(hash) => verify_password(password, hash).await?,
            None => {
                verify_password(password, self.dummy_hash.clone()).await?;
                false
            }
        };

        if !matched {
            debug!("Local login rejected for {}", email);
            return Err(ProviderError::invalid_credentials());
        }

        Ok(IdentityAssertion::new(email, ProviderTag::Local))
    }
}

#[track_caller]
fn duplicate(email: &str) -> ProviderError {
    ProviderError::DuplicateAccount {
        email: email.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[async_trait]
impl ProviderAdapter<LocalCredentials> for LocalAdapter {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Local
    }

    async fn resolve(&self, credentials: LocalCredentials) -> ProviderResult<IdentityAssertion> {
        match credentials {
            LocalCredentials::Register {
                email,
                password,
                name,
            } => self.register(email, password, name).await,
            LocalCredentials::Login { email, password } => self.login(email, password).await,
        }
    }
}
