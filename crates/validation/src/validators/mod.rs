//! Built-in rules
//!
//! Every rule here except the presence rules ([`Required`], [`NilOrNotEmpty`],
//! [`NotNil`], [`Nil`], [`Empty`]) accepts nil and empty values, so optional
//! fields stay optional until a presence rule says otherwise.
//!
//! Rules are immutable values: `.error(..)` returns a reconfigured copy.
//! Messages resolve through [`lang`](crate::lang) when a rule fails, keyed by
//! the rule's error code.

mod absent;
mod in_list;
mod length;
mod multiple_of;
mod range;
mod required;
mod string;

pub use absent::{Empty, Nil, empty, nil};
pub use in_list::{In, in_list};
pub use length::{Length, length, rune_length};
pub use multiple_of::{MultipleOf, multiple_of};
pub use range::{Bound, Range, range};
pub use required::{NilOrNotEmpty, NotNil, Required, nil_or_not_empty, not_nil, required};
pub use string::{StringRule, alphanumeric, digits, email, matches};

use std::borrow::Cow;

use crate::foundation::ValidationError;
use crate::lang;

/// The error a rule reports, with an optional custom message.
///
/// The stored error is the template; [`ErrorTemplate::failure`] builds a
/// fresh error each time so callers never share state with the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorTemplate {
    error: ValidationError,
    custom: Option<Cow<'static, str>>,
}

impl ErrorTemplate {
    pub(crate) fn new(code: &'static str, message: &'static str) -> Self {
        Self {
            error: ValidationError::new(code, message),
            custom: None,
        }
    }

    #[must_use]
    pub(crate) fn with_custom(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom = Some(message.into());
        self
    }

    #[must_use]
    pub(crate) fn with_error(self, error: ValidationError) -> Self {
        Self {
            error,
            custom: None,
        }
    }

    /// The stored template, as configured.
    pub(crate) fn template(&self) -> &ValidationError {
        &self.error
    }

    /// Builds the error to report, resolving the message in the current
    /// language.
    pub(crate) fn failure(&self) -> ValidationError {
        let message = lang::message(
            self.error.code(),
            self.error.message(),
            self.custom.as_deref(),
        );
        self.error.clone().with_message(message)
    }
}
