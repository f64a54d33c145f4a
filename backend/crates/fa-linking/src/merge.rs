use fa_core::{IdentityAssertion, RecordPatch};
use fa_db::StoredIdentity;

/// Compute the changes one assertion makes to an existing record.
///
/// - `name` is backfilled only while the stored name is null.
/// - The provider is added to the linked set; a legacy-shaped set is always
///   rewritten, even when the provider was already present.
/// - An external id is recorded only if none is stored for that provider.
///
/// An empty patch means the assertion is already fully reflected.
pub fn plan_merge(stored: &StoredIdentity, assertion: &IdentityAssertion) -> RecordPatch {
    let record = &stored.record;
    let mut patch = RecordPatch::default();

    if record.name.is_none() {
        patch.name = assertion.display_name.clone();
    }

    let mut providers = record.linked_providers.clone();
    let added = providers.insert(assertion.provider);
    if added || stored.legacy_providers {
        patch.linked_providers = Some(providers);
    }

    if let Some(ref external_id) = assertion.external_id
        && !record.external_ids.contains_key(&assertion.provider)
    {
        let mut external_ids = record.external_ids.clone();
        external_ids.insert(assertion.provider, external_id.clone());
        patch.external_ids = Some(external_ids);
    }

    patch
}
