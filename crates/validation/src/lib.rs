//! # nebula-validation
//!
//! Rule-based validation of arbitrary values, with keyed and nested error
//! reports.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_validation::prelude::*;
//! use std::collections::HashMap;
//!
//! let data = HashMap::from([("key1", ""), ("key2", "value2"), ("key3", "")]);
//! let err = validate(&data, &[&Each::new(&[&required()])]).unwrap_err();
//! assert_eq!(err.to_string(), "key1: cannot be blank; key3: cannot be blank.");
//! ```
//!
//! ## Pieces
//!
//! - [`Rule`] is one check. Built-in rules live in [`validators`], rules that
//!   drive other rules in [`combinators`].
//! - [`validate`] runs a rule list and then lets the value validate itself
//!   through [`Validatable`]. [`validate_with_context`] threads a
//!   [`Context`] carrying request values and cancellation.
//! - [`validate_struct`] and [`validate_map`] validate by field and by key,
//!   collecting failures into [`ValidationErrors`].
//! - [`Error`] separates data failures from [`InternalError`]s, which signal a
//!   misconfigured call and are never aggregated.
//! - [`lang`] resolves messages in the configured language.
//!
//! User types join in through [`impl_value!`] and [`fields!`].

#![allow(clippy::result_large_err)]

mod macros;

pub mod combinators;
pub mod engine;
pub mod foundation;
#[cfg(feature = "json")]
mod json;
pub mod lang;
pub mod prelude;
pub mod validators;

pub use combinators::{
    By, ByWithContext, Each, FieldRules, Guarded, KeyRules, MapRules, Skip, StructField,
    StructRules, When, by, by_with_context, field, key, map_rules, validate_map,
    validate_map_with_context, validate_struct, validate_struct_with_context, when,
};
pub use engine::{MAX_DEPTH, validate, validate_with_context};
pub use foundation::{
    Context, Error, InternalError, Key, KeyKind, Kind, MapKey, MapView, Rule, RuleExt,
    TranslationError, Translator, Validatable, ValidatableWithContext, ValidationError,
    ValidationErrors, Value,
};
pub use lang::LanguageTranslator;
