//! The dispatch engine
//!
//! [`validate`] runs a rule list against a value and then, unless a rule
//! skipped, lets the value validate itself:
//!
//! 1. Rules run in order. A skipping rule ends the call successfully; the
//!    first failing rule ends it with that failure.
//! 2. A nil value is valid.
//! 3. A value with the [`Validatable`](crate::Validatable) capability is
//!    validated by it, and nothing else is walked.
//! 4. Sequences and maps validate each non-nil element that has the
//!    capability. Failures are collected under the decimal index or the
//!    key's display form.
//!
//! [`validate_with_context`] does the same with a [`Context`], checking it
//! for cancellation before every rule and before every element. The value
//! itself uses the context-aware capability when it has one, otherwise the
//! plain one. Elements run the context-aware capability first and, if it
//! passes, the plain one too.

use std::cell::Cell;

use crate::foundation::{Context, Error, InternalError, Kind, Rule, ValidationErrors, Value};

/// How deeply engine calls may nest on one thread before failing with
/// [`InternalError::DepthExceeded`].
pub const MAX_DEPTH: usize = 128;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Result<Self, InternalError> {
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_DEPTH {
                tracing::warn!(max_depth = MAX_DEPTH, "validation nesting too deep");
                return Err(InternalError::DepthExceeded(MAX_DEPTH));
            }
            depth.set(current + 1);
            Ok(Self)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Validates a value against a rule list, then lets it validate itself.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// let names = vec!["", "ok", ""];
/// let err = validate(&names, &[&Each::new(&[&required()])]).unwrap_err();
/// assert_eq!(err.to_string(), "0: cannot be blank; 2: cannot be blank.");
///
/// assert!(validate(&"", &[&required()]).is_err());
/// assert!(validate(&"x", &[&required()]).is_ok());
/// ```
pub fn validate(value: &dyn Value, rules: &[&dyn Rule]) -> Result<(), Error> {
    let _guard = DepthGuard::enter()?;

    for rule in rules {
        if rule.is_skip() {
            return Ok(());
        }
        rule.validate(value)?;
    }

    if value.is_nil() {
        return Ok(());
    }

    if let Some(validatable) = value.as_validatable() {
        return validatable.validate();
    }

    match elements(&value.kind()) {
        Some(items) => collect(items, |element| match element.as_validatable() {
            Some(validatable) => validatable.validate(),
            None => Ok(()),
        }),
        None => Ok(()),
    }
}

/// Context-aware counterpart of [`validate`].
///
/// Rules run through [`Rule::validate_with_context`]. Cancellation and an
/// expired deadline surface as internal errors.
pub fn validate_with_context(
    ctx: &Context,
    value: &dyn Value,
    rules: &[&dyn Rule],
) -> Result<(), Error> {
    let _guard = DepthGuard::enter()?;

    for rule in rules {
        if rule.is_skip() {
            return Ok(());
        }
        ctx.check()?;
        rule.validate_with_context(ctx, value)?;
    }

    if value.is_nil() {
        return Ok(());
    }

    if let Some(validatable) = value.as_validatable_with_context() {
        return validatable.validate_with_context(ctx);
    }
    if let Some(validatable) = value.as_validatable() {
        return validatable.validate();
    }

    match elements(&value.kind()) {
        Some(items) => collect(items, |element| {
            ctx.check()?;
            // elements run both capabilities, the context-aware one first
            if let Some(validatable) = element.as_validatable_with_context() {
                validatable.validate_with_context(ctx)?;
            }
            match element.as_validatable() {
                Some(validatable) => validatable.validate(),
                None => Ok(()),
            }
        }),
        None => Ok(()),
    }
}

// ============================================================================
// ELEMENT WALKING
// ============================================================================

/// Lists the elements of a sequence or map together with the name each
/// one is reported under. Returns `None` for every other kind.
pub(crate) fn elements<'a>(kind: &Kind<'a>) -> Option<Vec<(String, &'a dyn Value)>> {
    match kind {
        Kind::Seq(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), *item))
                .collect(),
        ),
        Kind::Map(map) => Some(map.iter().map(|(key, item)| (key.to_string(), item)).collect()),
        _ => None,
    }
}

/// Runs `check` on every non-nil element and gathers the failures.
///
/// An internal error stops the walk and is returned as is.
pub(crate) fn collect<'a>(
    items: Vec<(String, &'a dyn Value)>,
    mut check: impl FnMut(&'a dyn Value) -> Result<(), Error>,
) -> Result<(), Error> {
    let mut errors = ValidationErrors::new();
    for (key, item) in items {
        if item.is_nil() {
            continue;
        }
        match check(item) {
            Ok(()) => {}
            Err(Error::Internal(internal)) => return Err(internal.into()),
            Err(error) => errors.insert(key, error),
        }
    }
    errors.into_result()
}
