//! In-process identity store.
//!
//! Every operation runs under one `RwLock` write (or read) guard, which gives
//! the same insert-if-absent / compare-and-update guarantees as the SQL store.
//! Used for tests and single-process development runs.

use crate::{DbError, IdentityStore, Result as DbErrorResult, StoredIdentity};

use fa_core::{IdentityRecord, ProviderField, RecordPatch};

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

struct MemoryEntry {
    record: IdentityRecord,
    /// Provider field as stored; `record.linked_providers` is ignored on read
    providers: Option<ProviderField>,
    version: i64,
}

impl MemoryEntry {
    fn to_stored(&self) -> StoredIdentity {
        let (linked_providers, legacy_providers) = ProviderField::normalize(self.providers.clone());
        let mut record = self.record.clone();
        record.linked_providers = linked_providers;
        StoredIdentity {
            record,
            version: self.version,
            legacy_providers,
        }
    }
}

#[derive(Default)]
pub struct MemoryIdentityStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record with its provider field in an arbitrary stored shape,
    /// e.g. a legacy scalar. Replaces any existing entry.
    pub async fn import_raw(&self, record: IdentityRecord, providers: Option<ProviderField>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            record.email.clone(),
            MemoryEntry {
                record,
                providers,
                version: 1,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<StoredIdentity>> {
        let entries = self.entries.read().await;
        Ok(entries.get(email).map(MemoryEntry::to_stored))
    }

    async fn insert_if_absent(&self, record: &IdentityRecord) -> DbErrorResult<StoredIdentity> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&record.email) {
            return Err(DbError::conflict(&record.email));
        }

        let entry = MemoryEntry {
            record: record.clone(),
            providers: Some(ProviderField::Set(record.linked_providers.clone())),
            version: 1,
        };
        let stored = entry.to_stored();
        entries.insert(record.email.clone(), entry);
        Ok(stored)
    }

    async fn compare_and_update(
        &self,
        email: &str,
        expected_version: i64,
        patch: &RecordPatch,
    ) -> DbErrorResult<StoredIdentity> {
        let mut entries = self.entries.write().await;
        let entry = match entries.get_mut(email) {
            Some(entry) if entry.version == expected_version => entry,
            _ => return Err(DbError::conflict(email)),
        };

        entry.record.apply(patch);
        if let Some(ref providers) = patch.linked_providers {
            entry.providers = Some(ProviderField::Set(providers.clone()));
        }
        entry.version += 1;

        Ok(entry.to_stored())
    }

    async fn ping(&self) -> DbErrorResult<()> {
        Ok(())
    }
}
