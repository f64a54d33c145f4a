use crate::{IdentityAssertion, IdentityRecord, ProviderSet, ProviderTag, RecordPatch};

use std::collections::BTreeMap;

use googletest::prelude::*;

#[test]
fn given_linkedin_assertion_when_record_created_then_external_id_recorded() {
    let assertion = IdentityAssertion::new("a@x.com", ProviderTag::Linkedin)
        .with_display_name(Some("Ann".to_string()))
        .with_external_id(Some("li-123".to_string()));

    let record = IdentityRecord::from_assertion(&assertion);

    assert_that!(record.email, eq("a@x.com"));
    assert_eq!(record.name.as_deref(), Some("Ann"));
    assert_that!(record.linked_providers, eq(&ProviderSet::single(ProviderTag::Linkedin)));
    assert_eq!(
        record.external_ids.get(&ProviderTag::Linkedin).map(String::as_str),
        Some("li-123")
    );
    assert!(!record.has_password());
}

#[test]
fn given_patch_without_name_when_applied_then_name_kept() {
    let assertion =
        IdentityAssertion::new("a@x.com", ProviderTag::Google).with_display_name(Some("Ann".into()));
    let mut record = IdentityRecord::from_assertion(&assertion);

    record.apply(&RecordPatch {
        name: None,
        linked_providers: Some([ProviderTag::Google, ProviderTag::Github].into_iter().collect()),
        external_ids: Some(BTreeMap::new()),
    });

    assert_eq!(record.name.as_deref(), Some("Ann"));
    assert_that!(record.linked_providers.len(), eq(2));
}

#[test]
fn given_record_without_name_then_greeting_uses_email() {
    let record = IdentityRecord::from_assertion(&IdentityAssertion::new(
        "a@x.com",
        ProviderTag::Github,
    ));

    assert_that!(record.greeting_name(), eq("a@x.com"));
}

#[test]
fn given_record_when_serialized_then_password_hash_omitted() {
    let assertion = IdentityAssertion::new("a@x.com", ProviderTag::Local)
        .with_password_hash("$argon2id$secret".to_string());
    let record = IdentityRecord::from_assertion(&assertion);

    let json = serde_json::to_string(&record).unwrap();

    assert_that!(json, not(contains_substring("password_hash")));
}
