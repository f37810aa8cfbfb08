//! Validating a customer record for nebula-validation

use nebula_validation::prelude::*;
use nebula_validation::{fields, impl_value};
use regex::Regex;

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
        let state = matches(Regex::new(r"^[A-Z]{2}$").expect("valid pattern"));
        let zip = matches(Regex::new(r"^[0-9]{5}$").expect("valid pattern"));
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

fn main() {
    let customer = Customer {
        name: "Qiang Xue".into(),
        gender: String::new(),
        email: "q".into(),
        address: Address {
            street: "123 Main Street".into(),
            city: "Unknown".into(),
            state: "Virginia".into(),
            zip: "12345".into(),
        },
    };

    match validate(&customer, &[]) {
        Ok(()) => println!("✓ customer is valid"),
        Err(e) => {
            println!("✗ {e}");
            if let Some(errors) = e.as_nested() {
                println!("{:#}", errors.to_document());
            }
        }
    }
}
