//! WHEN combinators - conditional validation
//!
//! [`When`] picks one of two rule lists and runs it through the engine.
//! [`Guarded`] (from [`RuleExt::when`](crate::RuleExt::when)) enables or
//! disables a single rule.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::prelude::*;
//!
//! let is_company = true;
//! let vat_id = "";
//!
//! let err = validate(&vat_id, &[&when(is_company, &[&required()])]).unwrap_err();
//! assert_eq!(err.to_string(), "cannot be blank");
//! assert!(validate(&vat_id, &[&when(false, &[&required()])]).is_ok());
//! ```

use std::fmt;

use crate::engine;
use crate::foundation::{Context, Error, Rule, Value};

// ============================================================================
// GUARDED RULE
// ============================================================================

/// A rule that only applies when a condition holds.
#[derive(Debug, Clone, Copy)]
pub struct Guarded<R> {
    rule: R,
    condition: bool,
}

impl<R> Guarded<R> {
    /// Creates a guarded rule.
    pub fn new(rule: R, condition: bool) -> Self {
        Self { rule, condition }
    }

    /// Returns a reference to the inner rule.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Whether the inner rule applies.
    pub fn condition(&self) -> bool {
        self.condition
    }
}

impl<R: Rule> Rule for Guarded<R> {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if self.condition {
            self.rule.validate(value)
        } else {
            Ok(())
        }
    }

    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        if self.condition {
            self.rule.validate_with_context(ctx, value)
        } else {
            Ok(())
        }
    }

    fn is_skip(&self) -> bool {
        self.condition && self.rule.is_skip()
    }
}

// ============================================================================
// WHEN
// ============================================================================

enum Condition<'a> {
    Fixed(bool),
    Matching(Box<dyn Fn(&dyn Value) -> bool + 'a>),
}

impl Condition<'_> {
    fn holds(&self, value: &dyn Value) -> bool {
        match self {
            Condition::Fixed(condition) => *condition,
            Condition::Matching(predicate) => predicate(value),
        }
    }
}

/// Runs one of two rule lists depending on a condition.
///
/// The chosen list runs through the full engine, so it may contain
/// [`Skip`](crate::combinators::Skip) and the value still gets a chance to
/// validate itself.
pub struct When<'a> {
    condition: Condition<'a>,
    then: &'a [&'a dyn Rule],
    otherwise: &'a [&'a dyn Rule],
}

impl<'a> When<'a> {
    /// Runs `rules` when `condition` is true.
    pub fn new(condition: bool, rules: &'a [&'a dyn Rule]) -> Self {
        Self {
            condition: Condition::Fixed(condition),
            then: rules,
            otherwise: &[],
        }
    }

    /// Runs `rules` when `predicate` accepts the value being validated.
    pub fn matching(
        predicate: impl Fn(&dyn Value) -> bool + 'a,
        rules: &'a [&'a dyn Rule],
    ) -> Self {
        Self {
            condition: Condition::Matching(Box::new(predicate)),
            then: rules,
            otherwise: &[],
        }
    }

    /// Sets the rules to run when the condition does not hold.
    #[must_use = "builder methods must be chained or built"]
    pub fn otherwise(mut self, rules: &'a [&'a dyn Rule]) -> Self {
        self.otherwise = rules;
        self
    }

    fn branch(&self, value: &dyn Value) -> &'a [&'a dyn Rule] {
        if self.condition.holds(value) {
            self.then
        } else {
            self.otherwise
        }
    }
}

impl Rule for When<'_> {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        engine::validate(value, self.branch(value))
    }

    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        engine::validate_with_context(ctx, value, self.branch(value))
    }
}

impl fmt::Debug for When<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let condition: &dyn fmt::Debug = match &self.condition {
            Condition::Fixed(condition) => condition,
            Condition::Matching(_) => &"<predicate>",
        };
        f.debug_struct("When")
            .field("condition", condition)
            .field("then", &self.then.len())
            .field("otherwise", &self.otherwise.len())
            .finish()
    }
}

/// Creates a [`When`] rule.
pub fn when<'a>(condition: bool, rules: &'a [&'a dyn Rule]) -> When<'a> {
    When::new(condition, rules)
}
