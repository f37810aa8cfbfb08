//! BY - inline rules from closures

use std::fmt;

use crate::foundation::{Context, Error, InternalError, Rule, Value};

/// A rule backed by a closure.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// let even = by(|value: &dyn Value| match value.kind() {
///     Kind::Int(i) if i % 2 != 0 => Err(Error::custom("must be even")),
///     _ => Ok(()),
/// });
///
/// assert!(validate(&4, &[&even]).is_ok());
/// assert_eq!(validate(&3, &[&even]).unwrap_err().to_string(), "must be even");
/// ```
#[derive(Clone, Copy)]
pub struct By<F> {
    f: F,
}

impl<F> Rule for By<F>
where
    F: Fn(&dyn Value) -> Result<(), Error>,
{
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        (self.f)(value)
    }
}

impl<F> fmt::Debug for By<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("By")
    }
}

/// Wraps a closure into a [`Rule`].
pub fn by<F>(f: F) -> By<F>
where
    F: Fn(&dyn Value) -> Result<(), Error>,
{
    By { f }
}

/// A rule backed by a closure that needs the validation context.
///
/// Running it through the context-free engine fails with
/// [`InternalError::ContextRequired`].
#[derive(Clone, Copy)]
pub struct ByWithContext<F> {
    f: F,
}

impl<F> Rule for ByWithContext<F>
where
    F: Fn(&Context, &dyn Value) -> Result<(), Error>,
{
    fn validate(&self, _value: &dyn Value) -> Result<(), Error> {
        Err(InternalError::ContextRequired.into())
    }

    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        (self.f)(ctx, value)
    }
}

impl<F> fmt::Debug for ByWithContext<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByWithContext")
    }
}

/// Wraps a context-aware closure into a [`Rule`].
pub fn by_with_context<F>(f: F) -> ByWithContext<F>
where
    F: Fn(&Context, &dyn Value) -> Result<(), Error>,
{
    ByWithContext { f }
}
