//! SKIP - stop a rule list

use crate::foundation::{Error, Rule, Value};

/// Stops the rule list it appears in.
///
/// Rules after `Skip` do not run, and the engine does not go on to let the
/// value validate itself. Combine with [`RuleExt::when`](crate::RuleExt::when)
/// to skip conditionally.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// assert!(validate(&"", &[&Skip, &required()]).is_ok());
/// assert!(validate(&"", &[&Skip.when(false), &required()]).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Skip;

impl Rule for Skip {
    fn validate(&self, _value: &dyn Value) -> Result<(), Error> {
        Ok(())
    }

    fn is_skip(&self) -> bool {
        true
    }
}
