//! Absence rules: the value must not be there

use std::borrow::Cow;

use crate::foundation::{Error, Rule, ValidationError, Value};
use crate::validators::ErrorTemplate;

/// Requires a nil value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nil {
    err: ErrorTemplate,
}

impl Nil {
    /// Creates the rule with its default error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            err: ErrorTemplate::new("validation_nil", "must be blank"),
        }
    }

    /// Returns a copy reporting `message` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            err: self.err.clone().with_custom(message),
        }
    }

    /// Returns a copy reporting `error` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_object(&self, error: ValidationError) -> Self {
        Self {
            err: self.err.clone().with_error(error),
        }
    }

    /// The configured error, before message resolution.
    #[must_use]
    pub fn template(&self) -> &ValidationError {
        self.err.template()
    }
}

impl Default for Nil {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Nil {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() {
            Ok(())
        } else {
            Err(self.err.failure().into())
        }
    }
}

/// Creates a [`Nil`] rule.
#[must_use]
pub fn nil() -> Nil {
    Nil::new()
}

/// Requires a nil or empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Empty {
    err: ErrorTemplate,
}

impl Empty {
    /// Creates the rule with its default error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            err: ErrorTemplate::new("validation_empty", "must be blank"),
        }
    }

    /// Returns a copy reporting `message` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            err: self.err.clone().with_custom(message),
        }
    }

    /// Returns a copy reporting `error` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_object(&self, error: ValidationError) -> Self {
        Self {
            err: self.err.clone().with_error(error),
        }
    }

    /// The configured error, before message resolution.
    #[must_use]
    pub fn template(&self) -> &ValidationError {
        self.err.template()
    }
}

impl Default for Empty {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Empty {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() || value.is_empty() {
            Ok(())
        } else {
            Err(self.err.failure().into())
        }
    }
}

/// Creates an [`Empty`] rule.
#[must_use]
pub fn empty() -> Empty {
    Empty::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleExt;
    use rstest::rstest;

    #[rstest]
    #[case::number(&123, true)]
    #[case::empty_string(&"", true)]
    #[case::some_string(&Some("123"), true)]
    #[case::some_empty(&Some(""), true)]
    #[case::none(&None::<String>, false)]
    fn test_nil(#[case] value: &dyn Value, #[case] fails: bool) {
        assert_eq!(nil().validate(value).is_err(), fails);
    }

    #[rstest]
    #[case::number(&123, true)]
    #[case::empty_string(&"", false)]
    #[case::some_string(&Some("123"), true)]
    #[case::some_empty(&Some(""), false)]
    #[case::none(&None::<String>, false)]
    fn test_empty(#[case] value: &dyn Value, #[case] fails: bool) {
        assert_eq!(empty().validate(value).is_err(), fails);
    }

    #[test]
    fn test_conditional() {
        assert!(nil().when(false).validate(&42).is_ok());
        assert_eq!(
            nil().when(true).validate(&42).unwrap_err().to_string(),
            "must be blank"
        );
    }

    #[test]
    fn test_custom_message_leaves_original() {
        let original = nil();
        let custom = original.error("123");
        assert_eq!(original.validate(&"42").unwrap_err().to_string(), "must be blank");
        assert_eq!(custom.validate(&"42").unwrap_err().to_string(), "123");
    }
}
