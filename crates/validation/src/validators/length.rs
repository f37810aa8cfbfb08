//! Length rules
//!
//! Applies to strings, sequences and maps. A bound of zero means "no bound".
//! [`rune_length`] counts Unicode scalar values instead of bytes for strings.

use std::borrow::Cow;

use crate::foundation::{Error, InternalError, Kind, Rule, ValidationError, Value};
use crate::lang;

// ============================================================================
// LENGTH
// ============================================================================

/// Checks the length of a string, sequence or map.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// assert!(validate(&"abc", &[&length(2, 4)]).is_ok());
/// assert_eq!(
///     validate(&"abcdf", &[&length(2, 4)]).unwrap_err().to_string(),
///     "the length must be between 2 and 4"
/// );
/// assert!(validate(&"", &[&length(2, 4)]).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    min: usize,
    max: usize,
    runes: bool,
    message: Option<Cow<'static, str>>,
}

impl Length {
    /// Creates a byte/element length rule.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            runes: false,
            message: None,
        }
    }

    /// Creates a rule that counts characters of strings.
    #[must_use]
    pub fn runes(min: usize, max: usize) -> Self {
        Self {
            runes: true,
            ..Self::new(min, max)
        }
    }

    /// Returns a copy reporting `message` instead.
    ///
    /// `{min}` and `{max}` placeholders are available.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self.clone()
        }
    }

    fn measure(&self, kind: &Kind<'_>) -> Result<usize, InternalError> {
        match kind {
            Kind::Str(s) if self.runes => Ok(s.chars().count()),
            _ => kind.len().ok_or(InternalError::UnsupportedKind {
                rule: "length",
                kind: kind.name(),
            }),
        }
    }

    fn failure(&self) -> ValidationError {
        let (code, default) = match (self.min, self.max) {
            (0, max) if max > 0 => ("length_more_than", "the length must be no more than {max}"),
            (min, 0) if min > 0 => ("length_no_less_than", "the length must be no less than {min}"),
            (min, max) if min > 0 && min == max => ("length_exactly", "the length must be exactly {min}"),
            (min, _) if min > 0 => ("length_between", "the length must be between {min} and {max}"),
            _ => ("length_empty", "the value must be empty"),
        };
        let message = lang::message(code, default, self.message.as_deref());
        ValidationError::new(code, message)
            .with_param("min", self.min.to_string())
            .with_param("max", self.max.to_string())
    }
}

impl Rule for Length {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() || value.is_empty() {
            return Ok(());
        }
        let len = self.measure(&value.kind())?;
        let too_short = self.min > 0 && len < self.min;
        let too_long = self.max > 0 && len > self.max;
        // min == max == 0 only accepts the empty value, handled above
        let must_be_empty = self.min == 0 && self.max == 0;
        if too_short || too_long || must_be_empty {
            return Err(self.failure().into());
        }
        Ok(())
    }
}

/// Creates a [`Length`] rule counting bytes of strings.
#[must_use]
pub fn length(min: usize, max: usize) -> Length {
    Length::new(min, max)
}

/// Creates a [`Length`] rule counting characters of strings.
#[must_use]
pub fn rune_length(min: usize, max: usize) -> Length {
    Length::runes(min, max)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use rstest::rstest;

    fn message(rule: &Length, value: &dyn Value) -> Option<String> {
        rule.validate(value).err().map(|e| e.to_string())
    }

    #[rstest]
    #[case::within(2, 4, "abc", None)]
    #[case::empty(2, 4, "", None)]
    #[case::too_long(2, 4, "abcdf", Some("the length must be between 2 and 4"))]
    #[case::max_only_ok(0, 4, "ab", None)]
    #[case::max_only(0, 4, "abcde", Some("the length must be no more than 4"))]
    #[case::min_only_ok(2, 0, "ab", None)]
    #[case::min_only(2, 0, "a", Some("the length must be no less than 2"))]
    #[case::exact(2, 2, "abc", Some("the length must be exactly 2"))]
    #[case::must_be_empty(0, 0, "a", Some("the value must be empty"))]
    fn test_length(
        #[case] min: usize,
        #[case] max: usize,
        #[case] value: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(message(&length(min, max), &value).as_deref(), expected);
    }

    #[rstest]
    #[case::two_runes(2, 3, "💥💥", None)]
    #[case::three_runes(2, 3, "💥💥💥", None)]
    #[case::one_rune(2, 3, "💥", Some("the length must be between 2 and 3"))]
    #[case::four_runes(2, 3, "💥💥💥💥", Some("the length must be between 2 and 3"))]
    fn test_rune_length(
        #[case] min: usize,
        #[case] max: usize,
        #[case] value: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(message(&rune_length(min, max), &value).as_deref(), expected);
        // bytes overshoot for multi-byte characters
        assert!(length(min, max).validate(&"💥💥").is_err());
    }

    #[test]
    fn test_collections() {
        assert!(length(1, 2).validate(&vec![1, 2, 3]).is_err());
        assert!(length(1, 2).validate(&HashMap::from([("a", 1)])).is_ok());
        assert!(length(1, 2).validate(&None::<Vec<i32>>).is_ok());
    }

    #[test]
    fn test_unsupported_kind_is_internal() {
        let err = length(2, 0).validate(&123).unwrap_err();
        assert_eq!(
            err.as_internal(),
            Some(&InternalError::UnsupportedKind {
                rule: "length",
                kind: "int"
            })
        );
    }

    #[test]
    fn test_custom_message_uses_params() {
        let rule = length(2, 4).error("between {min} and {max} please");
        assert_eq!(
            message(&rule, &"abcdef").as_deref(),
            Some("between 2 and 4 please")
        );
        assert_eq!(
            message(&length(2, 4), &"abcdef").as_deref(),
            Some("the length must be between 2 and 4")
        );
    }
}
