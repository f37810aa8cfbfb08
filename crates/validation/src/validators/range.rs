//! Numeric bounds
//!
//! [`Bound`] is the common numeric type of [`Range`] and
//! [`MultipleOf`](super::MultipleOf). Signed and unsigned integers compare
//! exactly; anything involving a float compares as `f64`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::foundation::{Error, InternalError, Kind, Rule, ValidationError, Value};
use crate::lang;

// ============================================================================
// BOUND
// ============================================================================

/// A number used as a rule parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
}

impl Bound {
    /// Reads a numeric kind, if it is one.
    #[must_use]
    pub fn from_kind(kind: &Kind<'_>) -> Option<Self> {
        match kind {
            Kind::Int(i) => Some(Self::Int(*i)),
            Kind::Uint(u) => Some(Self::Uint(*u)),
            Kind::Float(f) => Some(Self::Float(*f)),
            _ => None,
        }
    }

    pub(crate) fn as_i128(self) -> Option<i128> {
        match self {
            Self::Int(i) => Some(i128::from(i)),
            Self::Uint(u) => Some(i128::from(u)),
            Self::Float(_) => None,
        }
    }

    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Uint(u) => u as f64,
            Self::Float(f) => f,
        }
    }

    /// Whether the bound is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self.as_i128() {
            Some(i) => i == 0,
            None => self.as_f64() == 0.0,
        }
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

macro_rules! bound_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Bound {
                fn from(value: $t) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

bound_from!(Int as i64: i8, i16, i32, i64);
bound_from!(Uint as u64: u8, u16, u32, u64);
bound_from!(Float as f64: f32, f64);

impl From<isize> for Bound {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Bound {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

// ============================================================================
// RANGE
// ============================================================================

/// Requires a number within `min..=max`.
///
/// Zero passes like every other empty value; pair it with
/// [`required`](super::required) to reject it.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// let port = range(1024u16, 65535u16);
/// assert!(validate(&8080u16, &[&port]).is_ok());
/// assert_eq!(
///     validate(&80u16, &[&port]).unwrap_err().to_string(),
///     "must be between 1024 and 65535"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    min: Bound,
    max: Bound,
    message: Option<Cow<'static, str>>,
}

impl Range {
    const CODE: &'static str = "validation_range_out_of_range";

    /// Creates the rule.
    pub fn new(min: impl Into<Bound>, max: impl Into<Bound>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            message: None,
        }
    }

    /// The lower bound.
    #[must_use]
    pub fn min(&self) -> Bound {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub fn max(&self) -> Bound {
        self.max
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
}

impl Rule for Range {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() || value.is_empty() {
            return Ok(());
        }
        let kind = value.kind();
        let number = Bound::from_kind(&kind).ok_or(InternalError::UnsupportedKind {
            rule: "range",
            kind: kind.name(),
        })?;
        if number >= self.min && number <= self.max {
            return Ok(());
        }
        let message = lang::message(
            Self::CODE,
            "must be between {min} and {max}",
            self.message.as_deref(),
        );
        Err(ValidationError::new(Self::CODE, message)
            .with_param("min", self.min.to_string())
            .with_param("max", self.max.to_string())
            .into())
    }
}

/// Creates a [`Range`] rule.
pub fn range(min: impl Into<Bound>, max: impl Into<Bound>) -> Range {
    Range::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::inside(&5, false)]
    #[case::lower_edge(&1, false)]
    #[case::upper_edge(&10, false)]
    #[case::below(&-3, true)]
    #[case::above(&11u32, true)]
    #[case::zero(&0, false)]
    #[case::float_inside(&2.5, false)]
    #[case::float_above(&10.5, true)]
    #[case::none(&None::<i32>, false)]
    fn test_range(#[case] value: &dyn Value, #[case] fails: bool) {
        assert_eq!(range(1, 10).validate(value).is_err(), fails);
    }

    #[test]
    fn test_message_and_custom_message() {
        let rule = range(1, 10);
        assert_eq!(rule.validate(&20).unwrap_err().to_string(), "must be between 1 and 10");
        let custom = rule.error("{min}..{max}");
        assert_eq!(custom.validate(&20).unwrap_err().to_string(), "1..10");
        assert_eq!(rule.validate(&20).unwrap_err().to_string(), "must be between 1 and 10");
    }

    #[test]
    fn test_mixed_sign_comparison() {
        assert!(range(-5i64, 5i64).validate(&u64::MAX).is_err());
        assert!(range(0u64, u64::MAX).validate(&-1i64).is_err());
        assert!(range(0.5, 1.5).validate(&1u8).is_ok());
    }

    #[test]
    fn test_string_is_unsupported() {
        let err = range(1, 10).validate(&"5").unwrap_err();
        assert_eq!(
            err.as_internal(),
            Some(&InternalError::UnsupportedKind {
                rule: "range",
                kind: "string"
            })
        );
    }

    #[test]
    fn test_bound_ordering() {
        assert!(Bound::Int(-1) < Bound::Uint(0));
        assert!(Bound::Uint(3) > Bound::Float(2.5));
        assert_eq!(Bound::from(7u16), Bound::Uint(7));
        assert_eq!(Bound::from(2.0f32), Bound::Float(2.0));
    }
}
