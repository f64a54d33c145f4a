mod identity_assertion;
mod identity_record;
mod provider_set;
mod provider_tag;
