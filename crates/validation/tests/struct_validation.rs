//! Struct validation through field enums and self-validating types.

use nebula_validation::prelude::*;
use nebula_validation::{fields, impl_value};
use pretty_assertions::assert_eq;
use regex::Regex;

// ============================================================================
// FIXTURES
// ============================================================================

struct Address {
    street: String,
    city: String,
    state: String,
    zip: String,
}

fields! {
    enum AddressField for Address {
        Street => street as "Street",
        City => city as "City",
        State => state as "State",
        Zip => zip as "Zip",
    }
}

impl Validatable for Address {
    fn validate(&self) -> Result<(), Error> {
        let state = matches(Regex::new(r"^[A-Z]{2}$").unwrap());
        let zip = matches(Regex::new(r"^[0-9]{5}$").unwrap());
        validate_struct(
            self,
            [
                field(AddressField::Street, &[&required(), &length(5, 50)]),
                field(AddressField::City, &[&required(), &length(5, 50)]),
                field(AddressField::State, &[&required(), &state]),
                field(AddressField::Zip, &[&required(), &zip]),
            ],
        )
    }
}

impl_value!(Address: Validatable);

struct Customer {
    name: String,
    gender: String,
    email: String,
    address: Address,
}

fields! {
    enum CustomerField for Customer {
        Name => name as "Name",
        Gender => gender as "Gender",
        Email => email as "Email",
        Address => address as "Address",
    }
}

impl Validatable for Customer {
    fn validate(&self) -> Result<(), Error> {
        validate_struct(
            self,
            [
                field(CustomerField::Name, &[&required(), &length(5, 20)]),
                field(CustomerField::Gender, &[&in_list(["Female", "Male"])]),
                field(CustomerField::Email, &[&required(), &email()]),
                field(CustomerField::Address, &[]),
            ],
        )
    }
}

impl_value!(Customer: Validatable);

fn customer() -> Customer {
    Customer {
        name: "Qiang Xue".into(),
        gender: String::new(),
        email: "q".into(),
        address: Address {
            street: "123 Main Street".into(),
            city: "Unknown".into(),
            state: "Virginia".into(),
            zip: "12345".into(),
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn nested_struct_errors_render_sorted_and_parenthesized() {
    let err = validate(&customer(), &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Address: (State: must be in a valid format.); Email: must be a valid email address."
    );
}

#[test]
fn nested_struct_errors_as_document() {
    let err = validate(&customer(), &[]).unwrap_err();
    let errors = err.as_nested().expect("keyed errors");
    insta::assert_json_snapshot!(errors.to_document(), @r#"
    {
      "Address": {
        "State": "must be in a valid format"
      },
      "Email": "must be a valid email address"
    }
    "#);
}

#[test]
fn valid_customer_passes() {
    let mut c = customer();
    c.email = "qiang@example.com".into();
    c.address.state = "VA".into();
    assert!(validate(&c, &[]).is_ok());
}

#[test]
fn skip_on_the_field_prevents_nested_validation() {
    let c = customer();
    let result = validate_struct(
        &c,
        [
            field(CustomerField::Address, &[&Skip]),
            field(CustomerField::Name, &[&required()]),
        ],
    );
    assert!(result.is_ok());
}

#[test]
fn collections_of_structs_are_keyed_by_index() {
    let mut good = customer();
    good.email = "a@b.co".into();
    good.address.state = "CA".into();
    let customers = vec![good, customer()];

    let err = validate(&customers, &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "1: (Address: (State: must be in a valid format.); Email: must be a valid email address.)."
    );
}

#[test]
fn optional_struct_is_valid_when_absent() {
    let missing: Option<Customer> = None;
    assert!(validate(&missing, &[]).is_ok());
    assert!(validate(&Some(customer()), &[]).is_err());
}

#[test]
fn field_errors_convert_to_json_with_serde() {
    let err = validate(&customer(), &[]).unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["Email"], "must be a valid email address");
    assert_eq!(json["Address"]["State"], "must be in a valid format");
}
