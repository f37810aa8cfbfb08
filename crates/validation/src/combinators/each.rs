//! EACH combinator - validates each element of a collection

use crate::engine;
use crate::foundation::{Context, Error, InternalError, Rule, ValidationErrors, Value};

// ============================================================================
// EACH COMBINATOR
// ============================================================================

/// Applies a rule list to every element of a sequence or every value of a map.
///
/// Failures are keyed by index or by key. By default every element is
/// checked; [`Each::fail_fast`] stops at the first failing element. A nil
/// value passes; any other non-collection is an internal error.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
/// use std::collections::HashMap;
///
/// let tags = HashMap::from([("a", ""), ("b", "ok"), ("c", "")]);
/// let err = validate(&tags, &[&Each::new(&[&required()])]).unwrap_err();
/// assert_eq!(err.to_string(), "a: cannot be blank; c: cannot be blank.");
/// ```
#[derive(Clone, Copy)]
pub struct Each<'a> {
    rules: &'a [&'a dyn Rule],
    fail_fast: bool,
}

impl<'a> Each<'a> {
    /// Creates an EACH combinator that checks every element.
    pub fn new(rules: &'a [&'a dyn Rule]) -> Self {
        Self {
            rules,
            fail_fast: false,
        }
    }

    /// Creates an EACH combinator that stops on the first failing element.
    pub fn fail_fast(rules: &'a [&'a dyn Rule]) -> Self {
        Self {
            rules,
            fail_fast: true,
        }
    }

    /// Sets whether to stop on the first failing element.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    fn run(
        &self,
        value: &dyn Value,
        mut check: impl FnMut(&dyn Value) -> Result<(), Error>,
    ) -> Result<(), Error> {
        if value.is_nil() {
            return Ok(());
        }
        let kind = value.kind();
        let Some(items) = engine::elements(&kind) else {
            return Err(InternalError::NotIterable { kind: kind.name() }.into());
        };

        let mut errors = ValidationErrors::new();
        for (key, item) in items {
            match check(item) {
                Ok(()) => {}
                Err(Error::Internal(internal)) => return Err(internal.into()),
                Err(error) => {
                    errors.insert(key, error);
                    if self.fail_fast {
                        break;
                    }
                }
            }
        }
        errors.into_result()
    }
}

impl Rule for Each<'_> {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        self.run(value, |item| engine::validate(item, self.rules))
    }

    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        self.run(value, |item| {
            ctx.check()?;
            engine::validate_with_context(ctx, item, self.rules)
        })
    }
}

impl std::fmt::Debug for Each<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Each")
            .field("rules", &self.rules.len())
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::validators::{length, required};

    #[test]
    fn test_each_collects_all_failures() {
        let values = ["", "value2", ""];
        let err = engine::validate(&values, &[&Each::new(&[&required()])]).unwrap_err();
        assert_eq!(err.to_string(), "0: cannot be blank; 2: cannot be blank.");
    }

    #[test]
    fn test_each_fail_fast_stops_at_first() {
        let values = vec!["", "value2", ""];
        let err = engine::validate(&values, &[&Each::fail_fast(&[&required()])]).unwrap_err();
        assert_eq!(err.to_string(), "0: cannot be blank.");
    }

    #[test]
    fn test_each_uses_first_failing_rule_per_element() {
        let values = vec!["a", "abcdefgh"];
        let err = engine::validate(&values, &[&Each::new(&[&required(), &length(2, 4)])])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "0: the length must be between 2 and 4; 1: the length must be between 2 and 4."
        );
    }

    #[test]
    fn test_each_on_map_keys_errors_by_key() {
        let values = BTreeMap::from([(1, ""), (2, "x")]);
        let err = engine::validate(&values, &[&Each::new(&[&required()])]).unwrap_err();
        assert_eq!(err.to_string(), "1: cannot be blank.");
    }

    #[test]
    fn test_each_checks_nil_elements() {
        let values = vec![None, Some("x")];
        let err = engine::validate(&values, &[&Each::new(&[&required()])]).unwrap_err();
        assert_eq!(err.to_string(), "0: cannot be blank.");
    }

    #[test]
    fn test_each_on_nil_and_scalars() {
        let missing: Option<Vec<String>> = None;
        assert!(engine::validate(&missing, &[&Each::new(&[&required()])]).is_ok());

        let err = engine::validate(&42, &[&Each::new(&[&required()])]).unwrap_err();
        assert_eq!(
            err.as_internal(),
            Some(&InternalError::NotIterable { kind: "int" })
        );
    }

    #[test]
    fn test_each_honours_cancellation() {
        let ctx = Context::new();
        ctx.cancel();
        let err = engine::validate_with_context(&ctx, &vec!["x"], &[]).unwrap_err();
        assert!(err.is_internal());

        let fresh = Context::new();
        assert!(
            engine::validate_with_context(&fresh, &vec!["x"], &[&Each::new(&[&required()])])
                .is_ok()
        );
    }
}
