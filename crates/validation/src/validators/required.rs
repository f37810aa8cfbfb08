//! Presence rules

use std::borrow::Cow;

use crate::foundation::{Error, Rule, ValidationError, Value};
use crate::validators::ErrorTemplate;

// ============================================================================
// REQUIRED
// ============================================================================

/// Requires a non-nil, non-empty value.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// assert_eq!(validate(&"", &[&required()]).unwrap_err().to_string(), "cannot be blank");
/// assert!(validate(&"x", &[&required()]).is_ok());
/// assert!(validate(&None::<String>, &[&required()]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Required {
    err: ErrorTemplate,
}

impl Required {
    /// Creates the rule with its default error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            err: ErrorTemplate::new("validation_required_is_blank", "cannot be blank"),
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

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Required {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() || value.is_empty() {
            return Err(self.err.failure().into());
        }
        Ok(())
    }
}

/// Creates a [`Required`] rule.
#[must_use]
pub fn required() -> Required {
    Required::new()
}

// ============================================================================
// NIL OR NOT EMPTY
// ============================================================================

/// Accepts nil, otherwise requires a non-empty value.
///
/// Useful for optional fields that must not be blank when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NilOrNotEmpty {
    err: ErrorTemplate,
}

impl NilOrNotEmpty {
    /// Creates the rule with its default error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            err: ErrorTemplate::new("validation_nil_or_not_empty_is_blank", "cannot be blank"),
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

impl Default for NilOrNotEmpty {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NilOrNotEmpty {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if !value.is_nil() && value.is_empty() {
            return Err(self.err.failure().into());
        }
        Ok(())
    }
}

/// Creates a [`NilOrNotEmpty`] rule.
#[must_use]
pub fn nil_or_not_empty() -> NilOrNotEmpty {
    NilOrNotEmpty::new()
}

// ============================================================================
// NOT NIL
// ============================================================================

/// Requires a non-nil value. Empty values pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotNil {
    err: ErrorTemplate,
}

impl NotNil {
    /// Creates the rule with its default error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            err: ErrorTemplate::new("validation_not_nil_invalid", "is required"),
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

impl Default for NotNil {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NotNil {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() {
            return Err(self.err.failure().into());
        }
        Ok(())
    }
}

/// Creates a [`NotNil`] rule.
#[must_use]
pub fn not_nil() -> NotNil {
    NotNil::new()
}
