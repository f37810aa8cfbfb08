//! Prelude module for convenient imports.
//!
//! Provides a single `use nebula_validation::prelude::*;` import that brings
//! in the entry points, the traits, the error types, every built-in rule and
//! every combinator.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::prelude::*;
//!
//! let username: [&dyn Rule; 3] = [&required(), &length(3, 20), &alphanumeric()];
//! assert!(validate(&"alice", &username).is_ok());
//! assert!(validate(&"al", &username).is_err());
//! ```

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::engine::{validate, validate_with_context};

// ============================================================================
// FOUNDATION: Core traits, errors, values
// ============================================================================

pub use crate::foundation::{
    Context, Error, InternalError, Key, Kind, Rule, RuleExt, Validatable, ValidatableWithContext,
    ValidationError, ValidationErrors, Value,
};

// ============================================================================
// VALIDATORS: All built-in rules
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Control flow, collections, maps and structs
// ============================================================================

pub use crate::combinators::{
    By, ByWithContext, Each, FieldRules, Guarded, KeyRules, MapRules, Skip, StructField,
    StructRules, When, by, by_with_context, field, key, map_rules, validate_map,
    validate_map_with_context, validate_struct, validate_struct_with_context, when,
};
