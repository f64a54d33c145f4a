use crate::{ProviderSet, ProviderTag};

use std::collections::BTreeMap;

/// Field-level changes to an existing identity record.
///
/// `None` means "leave as stored". Fields are only ever set, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub linked_providers: Option<ProviderSet>,
    pub external_ids: Option<BTreeMap<ProviderTag, String>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.linked_providers.is_none() && self.external_ids.is_none()
    }
}
