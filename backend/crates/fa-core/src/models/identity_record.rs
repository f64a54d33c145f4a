//! Identity record - the one canonical account per email.

use crate::{IdentityAssertion, ProviderSet, ProviderTag, RecordPatch};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate root for an end user. Keyed by email (case-sensitive, immutable).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub email: String,
    /// Backfilled from the first assertion that knows it, never overwritten
    pub name: Option<String>,
    /// Present only for accounts that registered locally
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub linked_providers: ProviderSet,
    pub external_ids: BTreeMap<ProviderTag, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IdentityRecord {
    /// Build the record created by the first assertion ever seen for an email
    pub fn from_assertion(assertion: &IdentityAssertion) -> Self {
        let now = Utc::now();
        let mut external_ids = BTreeMap::new();
        if let Some(ref id) = assertion.external_id {
            external_ids.insert(assertion.provider, id.clone());
        }

        Self {
            email: assertion.email.clone(),
            name: assertion.display_name.clone(),
            password_hash: assertion.password_hash.clone(),
            linked_providers: ProviderSet::single(assertion.provider),
            external_ids,
            created_at: now,
            updated_at: now,
        }
    }

    /// Only records with a stored hash can log in with a password
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Name for greetings, falling back to the email while the name is unknown
    pub fn greeting_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    /// Apply a patch in place. Only present fields are written.
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(ref name) = patch.name {
            self.name = Some(name.clone());
        }
        if let Some(ref providers) = patch.linked_providers {
            self.linked_providers = providers.clone();
        }
        if let Some(ref external_ids) = patch.external_ids {
            self.external_ids = external_ids.clone();
        }
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Debug for IdentityRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRecord")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .field("linked_providers", &self.linked_providers)
            .field("external_ids", &self.external_ids)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
