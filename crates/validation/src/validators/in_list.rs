//! Membership rule

use std::borrow::Cow;

use crate::foundation::{Error, InternalError, Key, Rule, ValidationError, Value};
use crate::validators::ErrorTemplate;

/// Requires the value to be one of a fixed list.
///
/// Signed and unsigned integers compare by numeric value, so `in_list([1, 2])`
/// accepts a `u8` of `1`. Nil and empty values pass.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// let status = in_list(["draft", "published"]);
/// assert!(validate(&"draft", &[&status]).is_ok());
/// assert_eq!(
///     validate(&"deleted", &[&status]).unwrap_err().to_string(),
///     "must be a valid value"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct In {
    values: Vec<Key>,
    err: ErrorTemplate,
}

impl In {
    /// Creates the rule from the allowed values.
    pub fn new<K: Into<Key>>(values: impl IntoIterator<Item = K>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            err: ErrorTemplate::new("validation_in_invalid", "must be a valid value"),
        }
    }

    /// The allowed values.
    #[must_use]
    pub fn values(&self) -> &[Key] {
        &self.values
    }

    /// Returns a copy reporting `message` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            values: self.values.clone(),
            err: self.err.clone().with_custom(message),
        }
    }

    /// Returns a copy reporting `error` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_object(&self, error: ValidationError) -> Self {
        Self {
            values: self.values.clone(),
            err: self.err.clone().with_error(error),
        }
    }
}

impl Rule for In {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() || value.is_empty() {
            return Ok(());
        }
        let kind = value.kind();
        let key = kind.to_key().ok_or(InternalError::UnsupportedKind {
            rule: "in",
            kind: kind.name(),
        })?;
        if self.values.iter().any(|allowed| allowed.loosely_eq(&key)) {
            Ok(())
        } else {
            Err(self.err.failure().into())
        }
    }
}

/// Creates an [`In`] rule.
pub fn in_list<K: Into<Key>>(values: impl IntoIterator<Item = K>) -> In {
    In::new(values)
}
