use crate::{IdentityAssertion, ProviderTag};

use googletest::prelude::*;

#[test]
fn given_blank_display_name_then_treated_as_absent() {
    let assertion = IdentityAssertion::new("a@x.com", ProviderTag::Github)
        .with_display_name(Some("   ".to_string()));

    assert_eq!(assertion.display_name, None);
}

#[test]
fn given_padded_display_name_then_trimmed() {
    let assertion = IdentityAssertion::new("a@x.com", ProviderTag::Google)
        .with_display_name(Some(" Ann ".to_string()));

    assert_eq!(assertion.display_name.as_deref(), Some("Ann"));
}

#[test]
fn given_password_hash_then_is_registration_and_debug_redacts_it() {
    let assertion = IdentityAssertion::new("a@x.com", ProviderTag::Local)
        .with_password_hash("$argon2id$secret".to_string());

    assert!(assertion.is_registration());
    let debug = format!("{:?}", assertion);
    assert_that!(debug, not(contains_substring("secret")));
}
