//! Divisibility rule

use std::borrow::Cow;

use crate::foundation::{Error, InternalError, Rule, ValidationError, Value};
use crate::lang;
use crate::validators::Bound;

/// Requires a number that is a multiple of `base`.
///
/// Zero passes like every other empty value. A zero base is a setup error.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// assert!(validate(&15, &[&multiple_of(5)]).is_ok());
/// assert_eq!(
///     validate(&16, &[&multiple_of(5)]).unwrap_err().to_string(),
///     "must be multiple of 5"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleOf {
    base: Bound,
    message: Option<Cow<'static, str>>,
}

impl MultipleOf {
    const CODE: &'static str = "validation_multiple_of_invalid";

    /// Creates the rule.
    pub fn new(base: impl Into<Bound>) -> Self {
        Self {
            base: base.into(),
            message: None,
        }
    }

    /// The divisor.
    #[must_use]
    pub fn base(&self) -> Bound {
        self.base
    }

    /// Returns a copy reporting `message` instead.
    ///
    /// A `{base}` placeholder is available.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self.clone()
        }
    }

    fn divides(&self, number: Bound) -> bool {
        match (number.as_i128(), self.base.as_i128()) {
            (Some(n), Some(b)) => n % b == 0,
            _ => (number.as_f64() / self.base.as_f64()).fract() == 0.0,
        }
    }
}

impl Rule for MultipleOf {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() || value.is_empty() {
            return Ok(());
        }
        if self.base.is_zero() {
            return Err(InternalError::custom("multiple_of base must not be zero").into());
        }
        let kind = value.kind();
        let number = Bound::from_kind(&kind).ok_or(InternalError::UnsupportedKind {
            rule: "multiple_of",
            kind: kind.name(),
        })?;
        if self.divides(number) {
            return Ok(());
        }
        let message = lang::message(Self::CODE, "must be multiple of {base}", self.message.as_deref());
        Err(ValidationError::new(Self::CODE, message)
            .with_param("base", self.base.to_string())
            .into())
    }
}

/// Creates a [`MultipleOf`] rule.
pub fn multiple_of(base: impl Into<Bound>) -> MultipleOf {
    MultipleOf::new(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::multiple(&20, false)]
    #[case::negative_multiple(&-15, false)]
    #[case::not_multiple(&21, true)]
    #[case::zero(&0, false)]
    #[case::unsigned(&25u8, false)]
    #[case::float_multiple(&10.0, false)]
    #[case::float_not_multiple(&10.5, true)]
    fn test_multiple_of(#[case] value: &dyn Value, #[case] fails: bool) {
        assert_eq!(multiple_of(5).validate(value).is_err(), fails);
    }

    #[test]
    fn test_float_base() {
        assert!(multiple_of(0.5).validate(&2.5).is_ok());
        assert!(multiple_of(0.5).validate(&3u32).is_ok());
        assert!(multiple_of(0.5).validate(&0.3).is_err());
    }

    #[test]
    fn test_zero_base_is_internal() {
        assert!(multiple_of(0).validate(&3).unwrap_err().is_internal());
    }

    #[test]
    fn test_message() {
        let rule = multiple_of(10u8);
        assert_eq!(rule.validate(&3).unwrap_err().to_string(), "must be multiple of 10");
        assert_eq!(
            rule.error("not a multiple of {base}").validate(&3).unwrap_err().to_string(),
            "not a multiple of 10"
        );
    }
}
