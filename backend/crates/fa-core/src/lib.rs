pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::identity_assertion::IdentityAssertion;
pub use models::identity_record::IdentityRecord;
pub use models::provider_set::{ProviderField, ProviderSet};
pub use models::provider_tag::ProviderTag;
pub use models::record_patch::RecordPatch;

#[cfg(test)]
mod tests;
