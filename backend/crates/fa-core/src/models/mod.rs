pub mod identity_assertion;
pub mod identity_record;
pub mod provider_set;
pub mod provider_tag;
pub mod record_patch;
