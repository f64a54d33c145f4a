use crate::{ProviderField, ProviderSet, ProviderTag};

use googletest::prelude::*;

#[test]
fn given_tag_already_present_when_inserted_then_set_unchanged() {
    let mut set = ProviderSet::single(ProviderTag::Google);

    let inserted = set.insert(ProviderTag::Google);

    assert!(!inserted);
    assert_that!(set.len(), eq(1));
}

#[test]
fn given_json_array_with_duplicates_when_parsed_then_duplicates_collapse() {
    let field: ProviderField = serde_json::from_str(r#"["google","github","google"]"#).unwrap();

    assert!(!field.is_legacy());
    let set = field.into_set();
    assert_that!(set.len(), eq(2));
    assert!(set.contains(ProviderTag::Github));
}

#[test]
fn given_legacy_scalar_when_normalized_then_one_element_set_flagged_for_rewrite() {
    let field: ProviderField = serde_json::from_str(r#""linkedin""#).unwrap();

    let (set, needs_rewrite) = ProviderField::normalize(Some(field));

    assert!(needs_rewrite);
    assert_that!(set, eq(&ProviderSet::single(ProviderTag::Linkedin)));
}

#[test]
fn given_missing_field_when_normalized_then_empty_set_flagged_for_rewrite() {
    let (set, needs_rewrite) = ProviderField::normalize(None);

    assert!(needs_rewrite);
    assert!(set.is_empty());
}

#[test]
fn given_set_when_serialized_then_written_as_sorted_array() {
    let set: ProviderSet = [ProviderTag::Github, ProviderTag::Local].into_iter().collect();

    let json = serde_json::to_string(&set).unwrap();

    assert_that!(json, eq(r#"["local","github"]"#));
}

#[test]
fn given_mixed_set_when_external_then_local_excluded() {
    let set: ProviderSet = [ProviderTag::Local, ProviderTag::Google].into_iter().collect();

    assert_eq!(set.external(), vec![ProviderTag::Google]);
}
