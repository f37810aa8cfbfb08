//! Combinators: rules that control how other rules run
//!
//! - [`Skip`] and [`When`] steer a rule list.
//! - [`by`] and [`by_with_context`] turn closures into rules.
//! - [`Each`] applies rules to every element of a collection.
//! - [`MapRules`] and [`StructRules`] validate maps by key and structs by field.

mod by;
mod each;
mod field;
mod map;
mod skip;
mod when;

pub use by::{By, ByWithContext, by, by_with_context};
pub use each::Each;
pub use field::{
    FieldRules, StructField, StructRules, field, validate_struct, validate_struct_with_context,
};
pub use map::{KeyRules, MapRules, key, map_rules, validate_map, validate_map_with_context};
pub use skip::Skip;
pub use when::{Guarded, When, when};
