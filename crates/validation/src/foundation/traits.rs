//! Core traits for the validation system
//!
//! [`Rule`] is what gets applied to a value. [`Validatable`] and
//! [`ValidatableWithContext`] are what a value implements to validate
//! itself; the engine picks them up through [`Value`] capability queries.

use crate::combinators::Guarded;
use crate::foundation::context::Context;
use crate::foundation::error::Error;
use crate::foundation::value::Value;

// ============================================================================
// RULE
// ============================================================================

/// A single check applied to a value.
///
/// Rules are immutable values. Most rules treat an empty value as valid and
/// leave presence to [`Required`](crate::validators::Required) and friends.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::{Error, Kind, Rule, Value, validate};
///
/// struct NoSpaces;
///
/// impl Rule for NoSpaces {
///     fn validate(&self, value: &dyn Value) -> Result<(), Error> {
///         match value.kind() {
///             Kind::Str(s) if s.contains(' ') => Err(Error::custom("must not contain spaces")),
///             _ => Ok(()),
///         }
///     }
/// }
///
/// assert!(validate(&"a b", &[&NoSpaces]).is_err());
/// assert!(validate(&"ab", &[&NoSpaces]).is_ok());
/// ```
pub trait Rule {
    /// Validates a value.
    fn validate(&self, value: &dyn Value) -> Result<(), Error>;

    /// Validates a value with a context.
    ///
    /// Defaults to ignoring the context.
    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        let _ = ctx;
        self.validate(value)
    }

    /// Whether this rule stops the rule list it appears in, and nested
    /// self-validation of the value.
    fn is_skip(&self) -> bool {
        false
    }
}

impl<R: Rule + ?Sized> Rule for &R {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        (**self).validate(value)
    }

    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        (**self).validate_with_context(ctx, value)
    }

    fn is_skip(&self) -> bool {
        (**self).is_skip()
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        (**self).validate(value)
    }

    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        (**self).validate_with_context(ctx, value)
    }

    fn is_skip(&self) -> bool {
        (**self).is_skip()
    }
}

// ============================================================================
// RULE EXTENSION TRAIT
// ============================================================================

/// Combinator methods available on every rule.
pub trait RuleExt: Rule + Sized {
    /// Applies the rule only when `condition` holds.
    ///
    /// A guarded [`Skip`](crate::combinators::Skip) skips only when the
    /// condition holds.
    fn when(self, condition: bool) -> Guarded<Self> {
        Guarded::new(self, condition)
    }
}

impl<R: Rule> RuleExt for R {}

// ============================================================================
// SELF-VALIDATION
// ============================================================================

/// A value that knows how to validate itself.
///
/// Advertise the implementation to the engine with
/// [`impl_value!`](crate::impl_value).
pub trait Validatable {
    /// Validates `self`.
    fn validate(&self) -> Result<(), Error>;
}

/// A value that validates itself using a context.
///
/// When a value has both capabilities, context-aware validation uses this one.
pub trait ValidatableWithContext {
    /// Validates `self` with the given context.
    fn validate_with_context(&self, ctx: &Context) -> Result<(), Error>;
}
