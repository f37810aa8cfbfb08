//! Map validation by key, per-element rules and rendering.

use std::collections::{BTreeMap, HashMap};

use nebula_validation::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn each_entry_is_reported_under_its_key() {
    let data = HashMap::from([("key1", ""), ("key2", "value2"), ("key3", "")]);
    let err = validate(&data, &[&Each::new(&[&required()])]).unwrap_err();
    assert_eq!(err.to_string(), "key1: cannot be blank; key3: cannot be blank.");
}

#[test]
fn key_rules_mirror_each_over_a_map() {
    let data = HashMap::from([("key1", ""), ("key2", "value2"), ("key3", "")]);
    let err = validate_map(
        &data,
        [
            key("key1", &[&required()]),
            key("key2", &[&required()]),
            key("key3", &[&required()]),
        ],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "key1: cannot be blank; key3: cannot be blank.");
}

#[test]
fn nested_maps_produce_nested_documents() {
    let mut address = BTreeMap::new();
    address.insert("street".to_owned(), String::new());
    address.insert("city".to_owned(), "Springfield".to_owned());

    let mut profile: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    profile.insert("address".to_owned(), address);

    let err = validate_map(
        &profile,
        [key(
            "address",
            &[&map_rules([
                key("street", &[&required()]),
                key("city", &[&required(), &length(3, 20)]),
            ])],
        )],
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "address: (street: cannot be blank.).");
    insta::assert_json_snapshot!(err, @r#"
    {
      "address": {
        "street": "cannot be blank"
      }
    }
    "#);
}

#[test]
fn exhaustive_rules_reject_unknown_keys() {
    let data = HashMap::from([("name", "Ann"), ("role", "admin")]);
    let name_rules: [&dyn Rule; 1] = [&required()];
    let rules = map_rules([key("name", &name_rules)]).exhaustive();
    assert_eq!(
        rules.validate_map(&data).unwrap_err().to_string(),
        "role: key not expected."
    );
    assert!(validate_map(&data, [key("name", &[&required()])]).is_ok());
}

#[test]
fn setup_errors_are_not_aggregated() {
    let data = HashMap::from([(1u32, "one")]);
    let err = validate_map(&data, [key(2u32, &[&required()])]).unwrap_err();
    assert!(err.is_internal());
    assert_eq!(err.to_string(), "key \"2\" cannot be found in the map");

    let err = validate_map(&data, [key(1i64, &[&required()])]).unwrap_err();
    assert!(matches!(err.as_internal(), Some(InternalError::KeyWrongType(_))));
}

#[test]
fn each_on_a_scalar_is_a_setup_error() {
    let err = validate(&5, &[&Each::new(&[&required()])]).unwrap_err();
    assert_eq!(err.to_string(), "must be an iterable (map, slice or array), got int");
}

#[test]
fn rule_order_decides_the_reported_failure() {
    let short = length(5, 0);
    let alnum = alphanumeric();
    let a: [&dyn Rule; 2] = [&short, &alnum];
    let b: [&dyn Rule; 2] = [&alnum, &short];

    assert_eq!(
        validate(&"a-b", &a).unwrap_err().to_string(),
        "the length must be no less than 5"
    );
    assert_eq!(
        validate(&"a-b", &b).unwrap_err().to_string(),
        "must contain English letters and digits only"
    );
}
