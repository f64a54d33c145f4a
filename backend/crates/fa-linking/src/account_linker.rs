//! Account Linking Engine.
//!
//! Folds every successful identity assertion into the one record kept per
//! email. The read-then-write sequence is never trusted on its own: creation
//! goes through the store's insert-if-absent, merges through compare-and-update
//! on the version that was read, and a lost race re-runs the whole step.

use crate::{LinkError, Result as LinkResult, RetryConfig, plan_merge, retry_on_conflict};

use fa_core::{IdentityAssertion, IdentityRecord};
use fa_db::IdentityStore;

use std::sync::Arc;

use log::{debug, info};

pub struct AccountLinker {
    store: Arc<dyn IdentityStore>,
    retry: RetryConfig,
}

impl AccountLinker {
    pub fn new(store: Arc<dyn IdentityStore>, retry: RetryConfig) -> Self {
        Self { store, retry }
    }

    /// Link `assertion` to its account, creating the account on first sight.
    /// Returns the account email.
    pub async fn link(&self, assertion: &IdentityAssertion) -> LinkResult<String> {
        retry_on_conflict(&self.retry, "Account link", || self.try_link(assertion)).await
    }

    async fn try_link(&self, assertion: &IdentityAssertion) -> LinkResult<String> {
        let email = &assertion.email;

        let Some(stored) = self.store.find_by_email(email).await? else {
            let record = IdentityRecord::from_assertion(assertion);
            self.store.insert_if_absent(&record).await?;
            info!("Created identity {} via {}", email, assertion.provider);
            return Ok(email.clone());
        };

        if assertion.is_registration() {
            debug!("Registration for existing identity {} refused", email);
            return Err(LinkError::duplicate(email));
        }

        let patch = plan_merge(&stored, assertion);
        if patch.is_empty() {
            debug!("Identity {} already linked to {}", email, assertion.provider);
            return Ok(email.clone());
        }

        self.store
            .compare_and_update(email, stored.version, &patch)
            .await?;
        info!("Linked {} to identity {}", assertion.provider, email);

        Ok(email.clone())
    }

    pub fn store(&self) -> &Arc<dyn IdentityStore> {
        &self.store
    }
}
