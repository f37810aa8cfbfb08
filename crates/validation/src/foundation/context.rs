//! Validation context
//!
//! A [`Context`] travels through a context-aware validation call. It carries
//! request-scoped values for rules to read, a cancellation token and an
//! optional deadline. Rules only ever see it by shared reference.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::Context;
//!
//! let mut ctx = Context::new();
//! ctx.insert("tenant", String::from("acme"));
//!
//! let child = ctx.child();
//! assert_eq!(child.get::<String>("tenant").map(String::as_str), Some("acme"));
//! assert!(child.check().is_ok());
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::foundation::error::InternalError;

// ============================================================================
// CONTEXT
// ============================================================================

/// Ambient state for context-aware validation.
#[derive(Clone, Default)]
pub struct Context {
    /// Named values accessible during validation.
    data: HashMap<String, Arc<dyn Any + Send + Sync>>,

    /// Parent context, consulted when a key is not found locally.
    parent: Option<Arc<Context>>,

    cancellation: CancellationToken,

    deadline: Option<Instant>,
}

impl Context {
    /// Creates an empty context that is never cancelled unless asked to.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`Context::new`] for call sites that want to read like
    /// "no particular context".
    #[must_use]
    pub fn background() -> Self {
        Self::new()
    }

    /// Adds a value to the context.
    pub fn insert<T: Send + Sync + 'static>(&mut self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), Arc::new(value));
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value<T: Send + Sync + 'static>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Gets a value, looking through parents.
    ///
    /// Returns `None` when the key is absent or holds a different type.
    #[must_use]
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        if let Some(value) = self.data.get(key) {
            return value.downcast_ref::<T>();
        }
        self.parent.as_ref().and_then(|p| p.get(key))
    }

    /// Checks if a key exists here or in a parent.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key) || self.parent.as_ref().is_some_and(|p| p.contains(key))
    }

    /// Creates a child context.
    ///
    /// The child sees this context's values, inherits its deadline and is
    /// cancelled whenever this context is.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            data: HashMap::new(),
            parent: Some(Arc::new(self.clone())),
            cancellation: self.cancellation.child_token(),
            deadline: self.deadline,
        }
    }

    /// Replaces the cancellation token.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Sets an absolute deadline. An earlier inherited deadline wins.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Sets a deadline relative to now.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The token that cancels this context.
    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Cancels this context and all of its children.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Whether the context has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// The effective deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails if the context is cancelled or past its deadline.
    pub fn check(&self) -> Result<(), InternalError> {
        if self.cancellation.is_cancelled() {
            tracing::debug!("validation context cancelled");
            return Err(InternalError::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            tracing::debug!(?deadline, "validation context deadline exceeded");
            return Err(InternalError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Returns the number of values stored locally (excluding parents).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if no values are stored locally (excluding parents).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Context")
            .field("keys", &keys)
            .field("has_parent", &self.parent.is_some())
            .field("cancelled", &self.is_cancelled())
            .field("deadline", &self.deadline)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_values() {
        let mut ctx = Context::new();
        ctx.insert("limit", 10usize);
        assert_eq!(ctx.get::<usize>("limit"), Some(&10));
        assert_eq!(ctx.get::<i32>("limit"), None);
        assert!(ctx.contains("limit"));
        assert!(!ctx.contains("missing"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_child_reads_parent_and_shadows() {
        let parent = Context::new().with_value("a", 1i32).with_value("b", 2i32);
        let child = parent.child().with_value("b", 3i32);
        assert_eq!(child.get::<i32>("a"), Some(&1));
        assert_eq!(child.get::<i32>("b"), Some(&3));
        assert!(!child.is_empty());
    }

    #[test]
    fn test_cancelling_parent_cancels_child() {
        let parent = Context::new();
        let child = parent.child();
        assert!(child.check().is_ok());
        parent.cancel();
        assert!(child.is_cancelled());
        assert_eq!(child.check(), Err(InternalError::Cancelled));
    }

    #[test]
    fn test_cancelling_child_leaves_parent() {
        let parent = Context::new();
        let child = parent.child();
        child.cancel();
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn test_expired_deadline() {
        let ctx = Context::new().with_deadline(Instant::now());
        assert_eq!(ctx.check(), Err(InternalError::DeadlineExceeded));

        let relaxed = ctx.clone().with_timeout(Duration::from_secs(60));
        assert_eq!(relaxed.deadline(), ctx.deadline());
    }

    #[test]
    fn test_external_token() {
        let token = CancellationToken::new();
        let ctx = Context::background().with_cancellation(token.clone());
        token.cancel();
        assert!(ctx.is_cancelled());
    }
}
