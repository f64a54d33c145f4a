//! Linked provider set and its legacy storage shapes.
//!
//! Records written before provider linking existed stored a single provider
//! string (or nothing at all) instead of a list. `ProviderField` accepts every
//! shape that can be found in storage; `ProviderSet` is the only shape written.

use crate::ProviderTag;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of providers linked to one identity. Duplicates collapse, order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderSet(BTreeSet<ProviderTag>);

impl ProviderSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn single(tag: ProviderTag) -> Self {
        Self(BTreeSet::from([tag]))
    }

    pub fn contains(&self, tag: ProviderTag) -> bool {
        self.0.contains(&tag)
    }

    /// Add a provider. Returns false when it was already linked.
    pub fn insert(&mut self, tag: ProviderTag) -> bool {
        self.0.insert(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProviderTag> + '_ {
        self.0.iter().copied()
    }

    /// Linked providers excluding `local`
    pub fn external(&self) -> Vec<ProviderTag> {
        self.iter().filter(ProviderTag::is_external).collect()
    }
}

impl FromIterator<ProviderTag> for ProviderSet {
    fn from_iter<I: IntoIterator<Item = ProviderTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Provider field exactly as found in storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderField {
    Set(ProviderSet),
    /// Legacy: one provider stored as a bare string
    Scalar(ProviderTag),
}

impl ProviderField {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn into_set(self) -> ProviderSet {
        match self {
            Self::Set(set) => set,
            Self::Scalar(tag) => ProviderSet::single(tag),
        }
    }

    /// Normalize a possibly-missing stored field.
    ///
    /// Returns the set plus whether the stored form must be rewritten
    /// (scalar or missing).
    pub fn normalize(field: Option<ProviderField>) -> (ProviderSet, bool) {
        match field {
            Some(field) => {
                let legacy = field.is_legacy();
                (field.into_set(), legacy)
            }
            None => (ProviderSet::new(), true),
        }
    }
}

impl From<ProviderSet> for ProviderField {
    fn from(set: ProviderSet) -> Self {
        Self::Set(set)
    }
}
