use crate::{CoreError, ProviderTag};

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_every_tag_when_round_tripped_through_str_then_matches() {
    for tag in [
        ProviderTag::Local,
        ProviderTag::Google,
        ProviderTag::Linkedin,
        ProviderTag::Github,
    ] {
        let parsed = ProviderTag::from_str(tag.as_str()).unwrap();
        assert_that!(parsed, eq(tag));
    }
}

#[test]
fn given_unknown_tag_when_parsed_then_invalid_provider_tag() {
    let result = ProviderTag::from_str("facebook");

    assert!(matches!(
        result,
        Err(CoreError::InvalidProviderTag { ref value, .. }) if value == "facebook"
    ));
}

#[test]
fn given_tags_when_serialized_then_lowercase_strings() {
    let json = serde_json::to_string(&ProviderTag::Linkedin).unwrap();

    assert_that!(json, eq("\"linkedin\""));
}

#[test]
fn given_local_tag_then_not_external() {
    assert!(!ProviderTag::Local.is_external());
    assert!(ProviderTag::EXTERNAL.iter().all(ProviderTag::is_external));
}
