//! String predicate rules
//!
//! A [`StringRule`] wraps a `&str` predicate with an error code and a
//! default message. It accepts nil and empty values and rejects values that
//! are not strings with an [`InternalError`].

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::foundation::{Error, InternalError, Kind, Rule, ValidationError, Value};
use crate::validators::ErrorTemplate;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

// ============================================================================
// STRING RULE
// ============================================================================

/// A rule backed by a string predicate.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// let lowercase = StringRule::new(
///     "validation_lowercase",
///     "must be lowercase",
///     |s| !s.chars().any(char::is_uppercase),
/// );
/// assert!(validate(&"abc", &[&lowercase]).is_ok());
/// assert_eq!(
///     validate(&"aBc", &[&lowercase]).unwrap_err().to_string(),
///     "must be lowercase"
/// );
/// ```
#[derive(Clone)]
pub struct StringRule {
    predicate: Predicate,
    err: ErrorTemplate,
}

impl StringRule {
    /// Creates a rule from an error code, a default message and a predicate.
    pub fn new(
        code: &'static str,
        message: &'static str,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            err: ErrorTemplate::new(code, message),
        }
    }

    /// Returns a copy reporting `message` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            err: self.err.clone().with_custom(message),
        }
    }

    /// Returns a copy reporting `error` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn error_object(&self, error: ValidationError) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            err: self.err.clone().with_error(error),
        }
    }

    /// The configured error, before message resolution.
    #[must_use]
    pub fn template(&self) -> &ValidationError {
        self.err.template()
    }
}

impl fmt::Debug for StringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringRule")
            .field("code", &self.err.template().code())
            .finish_non_exhaustive()
    }
}

impl Rule for StringRule {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() || value.is_empty() {
            return Ok(());
        }
        match value.kind() {
            Kind::Str(s) if (self.predicate)(s) => Ok(()),
            Kind::Str(_) => Err(self.err.failure().into()),
            other => Err(InternalError::UnsupportedKind {
                rule: "string",
                kind: other.name(),
            }
            .into()),
        }
    }
}

// ============================================================================
// BUILT-IN STRING RULES
// ============================================================================

/// Requires the string to match `pattern`.
pub fn matches(pattern: Regex) -> StringRule {
    StringRule::new("validation_match_invalid", "must be in a valid format", move |s| {
        pattern.is_match(s)
    })
}

/// Requires a plausible email address.
pub fn email() -> StringRule {
    StringRule::new(
        "validation_is_email",
        "must be a valid email address",
        |s| EMAIL_REGEX.is_match(s),
    )
}

/// Requires ASCII digits only.
pub fn digits() -> StringRule {
    StringRule::new("validation_is_digit", "must contain digits only", |s| {
        s.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Requires ASCII letters and digits only.
pub fn alphanumeric() -> StringRule {
    StringRule::new(
        "validation_is_alphanumeric",
        "must contain English letters and digits only",
        |s| s.bytes().all(|b| b.is_ascii_alphanumeric()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("user@example.com", true)]
    #[case::subdomain("a.b+tag@mail.example.org", true)]
    #[case::no_at("user.example.com", false)]
    #[case::no_local("@example.com", false)]
    #[case::space("us er@example.com", false)]
    fn test_email(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(email().validate(&input).is_ok(), valid);
    }

    #[test]
    fn test_matches() {
        let rule = matches(Regex::new(r"^[A-Z]{2}$").unwrap());
        assert!(rule.validate(&"CA").is_ok());
        assert!(rule.validate(&"").is_ok());
        assert_eq!(
            rule.validate(&"California").unwrap_err().to_string(),
            "must be in a valid format"
        );
    }

    #[test]
    fn test_digits_and_alphanumeric() {
        assert!(digits().validate(&"0123").is_ok());
        assert!(digits().validate(&"12a").is_err());
        assert!(alphanumeric().validate(&"abc123").is_ok());
        assert!(alphanumeric().validate(&"abc-123").is_err());
    }

    #[test]
    fn test_non_string_is_internal() {
        let err = digits().validate(&12).unwrap_err();
        assert_eq!(
            err.as_internal(),
            Some(&InternalError::UnsupportedKind {
                rule: "string",
                kind: "int"
            })
        );
        assert!(digits().validate(&0).is_ok());
    }

    #[test]
    fn test_copies_do_not_share_errors() {
        let original = email();
        let custom = original.error("bad email");
        assert_eq!(custom.validate(&"x").unwrap_err().to_string(), "bad email");
        assert_eq!(
            original.validate(&"x").unwrap_err().to_string(),
            "must be a valid email address"
        );
        assert_eq!(original.template().code(), "validation_is_email");
    }
}
