//! Persistent store boundary for identity records.
//!
//! Writes are optimistic: every stored identity carries a version, and both
//! write operations fail with [`DbError::Conflict`] instead of overwriting a
//! concurrent change. Callers re-read and retry.
//!
//! [`DbError::Conflict`]: crate::DbError::Conflict

use crate::Result as DbErrorResult;

use fa_core::{IdentityRecord, RecordPatch};

use async_trait::async_trait;

/// An identity record as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIdentity {
    pub record: IdentityRecord,
    /// Optimistic locking version, bumped by every write
    pub version: i64,
    /// The provider field was stored in a legacy shape and must be rewritten
    pub legacy_providers: bool,
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<StoredIdentity>>;

    /// Atomically insert a record unless one already exists for its email.
    /// Fails with `Conflict` when the email is taken.
    async fn insert_if_absent(&self, record: &IdentityRecord) -> DbErrorResult<StoredIdentity>;

    /// Atomically apply `patch` if the stored version still equals
    /// `expected_version`. Fails with `Conflict` otherwise.
    async fn compare_and_update(
        &self,
        email: &str,
        expected_version: i64,
        patch: &RecordPatch,
    ) -> DbErrorResult<StoredIdentity>;

    /// Check the backing store is reachable
    async fn ping(&self) -> DbErrorResult<()>;
}
