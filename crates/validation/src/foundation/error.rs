//! Error types for validation outcomes
//!
//! A validation call either succeeds or produces an [`Error`]:
//!
//! - [`Error::Invalid`] wraps a single [`ValidationError`] (a leaf failure
//!   with a code, a message template and its parameters),
//! - [`Error::Nested`] wraps a [`ValidationErrors`] set keyed by field name,
//!   map key or sequence index,
//! - [`Error::Internal`] wraps an [`InternalError`], a misconfiguration of the
//!   validation call itself. Internal errors are never aggregated into a set.
//!
//! Rendering is deterministic: sets render their entries sorted by key,
//! joined with `"; "` and terminated with `"."`, nested sets in parentheses.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

/// A leaf validation failure.
///
/// The message is a template: `{name}` placeholders are substituted with the
/// parameter of the same name when the error is rendered. Placeholders
/// without a matching parameter are kept literally.
///
/// All setters consume and return the error, so configuring a clone never
/// affects the value it was cloned from.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::ValidationError;
///
/// let error = ValidationError::new("validation_length_out_of_range", "the length must be between {min} and {max}")
///     .with_param("min", "2")
///     .with_param("max", "8");
///
/// assert_eq!(error.to_string(), "the length must be between 2 and 8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    params: Params,
}

impl ValidationError {
    /// Creates a new validation error with a code and a message template.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: SmallVec::new(),
        }
    }

    /// Creates an error with an empty code.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("", message)
    }

    /// Replaces the code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Replaces the message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets a parameter, replacing any previous value with the same name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Replaces all parameters.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        self.params.clear();
        for (k, v) in params {
            self = self.with_param(k, v);
        }
        self
    }

    /// The machine-readable code. May be empty.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The message template, before substitution.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// All parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Looks up a parameter value by name.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Substitutes parameters into the message template.
    #[must_use]
    pub fn render(&self) -> String {
        if self.params.is_empty() {
            return self.message.to_string();
        }
        PLACEHOLDER
            .replace_all(&self.message, |caps: &Captures<'_>| {
                self.param(&caps[1])
                    .map_or_else(|| caps[0].to_owned(), str::to_owned)
            })
            .into_owned()
    }

    /// Translates this error on its own, outside of any field.
    pub fn translate(&self, translator: &dyn Translator) -> Result<String, TranslationError> {
        translator.translate_single(self)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

// ============================================================================
// ERROR SET
// ============================================================================

/// Validation errors keyed by field name, map key or sequence index.
///
/// Entries may hold `None` to record "validated, no error"; [`filter`]
/// removes them. Iteration and rendering are sorted by key.
///
/// [`filter`]: ValidationErrors::filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Option<Error>>,
}

impl ValidationErrors {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, error: impl Into<Error>) {
        self.errors.insert(key.into(), Some(error.into()));
    }

    /// Records an entry that may be empty.
    pub fn set(&mut self, key: impl Into<String>, error: Option<Error>) {
        self.errors.insert(key.into(), error);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: impl Into<String>, error: impl Into<Error>) -> Self {
        self.insert(key, error);
        self
    }

    /// Returns the error recorded under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Error> {
        self.errors.get(key).and_then(Option::as_ref)
    }

    /// Whether an entry (empty or not) exists under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    /// Number of entries, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the set has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over non-empty entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.errors
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|e| (k.as_str(), e)))
    }

    /// Removes empty entries. Returns `None` if nothing is left.
    #[must_use]
    pub fn filter(mut self) -> Option<Self> {
        self.errors.retain(|_, v| v.is_some());
        if self.errors.is_empty() { None } else { Some(self) }
    }

    /// Converts the set into a validation outcome.
    pub fn into_result(self) -> Result<(), Error> {
        match self.filter() {
            Some(errors) => Err(Error::Nested(errors)),
            None => Ok(()),
        }
    }

    /// Converts the set into a JSON document. Leaves become their rendered
    /// string, nested sets become nested objects.
    #[must_use]
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::Value::Object(self.document_map())
    }

    fn document_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.iter()
            .map(|(key, error)| {
                let value = match error {
                    Error::Nested(nested) => nested.to_document(),
                    other => serde_json::Value::String(other.to_string()),
                };
                (key.to_owned(), value)
            })
            .collect()
    }

    /// Translates every leaf through `translator`.
    ///
    /// Stops at the first translation failure; no partial document is
    /// returned. Internal errors are kept as their rendered string.
    pub fn translate(
        &self,
        translator: &dyn Translator,
    ) -> Result<serde_json::Map<String, serde_json::Value>, TranslationError> {
        let mut document = serde_json::Map::new();
        for (key, error) in self.iter() {
            let value = match error {
                Error::Nested(nested) => serde_json::Value::Object(nested.translate(translator)?),
                Error::Invalid(leaf) => {
                    serde_json::Value::String(translator.translate_field(key, leaf)?)
                }
                Error::Internal(internal) => serde_json::Value::String(internal.to_string()),
            };
            document.insert(key.to_owned(), value);
        }
        Ok(document)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self.iter().peekable();
        if entries.peek().is_none() {
            return Ok(());
        }
        for (i, (key, error)) in entries.enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match error {
                Error::Nested(nested) => write!(f, "{key}: ({nested})")?,
                other => write!(f, "{key}: {other}")?,
            }
        }
        f.write_str(".")
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, error) in self.iter() {
            map.serialize_entry(key, error)?;
        }
        map.end()
    }
}

impl<K: Into<String>, E: Into<Error>> FromIterator<(K, E)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (key, error) in iter {
            errors.insert(key, error);
        }
        errors
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// The failure side of every validation call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A single rule failed.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Nested values failed, keyed by where they live.
    #[error(transparent)]
    Nested(#[from] ValidationErrors),

    /// The validation call itself is misconfigured.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Shorthand for a leaf error with an empty code.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Invalid(ValidationError::custom(message))
    }

    /// Whether this is a configuration defect rather than a data failure.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// The leaf error, if this is one.
    #[must_use]
    pub fn as_invalid(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(e) => Some(e),
            _ => None,
        }
    }

    /// The nested set, if this is one.
    #[must_use]
    pub fn as_nested(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Nested(e) => Some(e),
            _ => None,
        }
    }

    /// The internal error, if this is one.
    #[must_use]
    pub fn as_internal(&self) -> Option<&InternalError> {
        match self {
            Self::Internal(e) => Some(e),
            _ => None,
        }
    }
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nested(nested) => nested.serialize(serializer),
            other => serializer.collect_str(other),
        }
    }
}

// ============================================================================
// INTERNAL ERROR
// ============================================================================

/// A defect in how validation was set up, not in the data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InternalError {
    /// Map rules were applied to something that is not a map.
    #[error("only a map can be validated, got {kind}")]
    NotMap { kind: &'static str },

    /// A key rule does not match the map's key type.
    #[error("key {0:?} is the wrong type")]
    KeyWrongType(String),

    /// A key rule names a key that is absent from the map.
    #[error("key {0:?} cannot be found in the map")]
    KeyNotFound(String),

    /// A field rule references a field the struct does not declare.
    #[error("field #{index} ({name:?}) cannot be found in the struct")]
    FieldNotFound { index: usize, name: String },

    /// A field rule targets a private field.
    #[error("field {0:?} is not exported and cannot be validated")]
    FieldNotExported(String),

    /// A per-element rule was applied to a value without elements.
    #[error("must be an iterable (map, slice or array), got {kind}")]
    NotIterable { kind: &'static str },

    /// A rule cannot handle the kind of value it was given.
    #[error("rule {rule:?} cannot validate a value of kind {kind}")]
    UnsupportedKind { rule: &'static str, kind: &'static str },

    /// A context-only rule ran without a context.
    #[error("rule requires a validation context")]
    ContextRequired,

    /// The context was cancelled.
    #[error("validation cancelled")]
    Cancelled,

    /// The context deadline passed.
    #[error("validation deadline exceeded")]
    DeadlineExceeded,

    /// Values nest deeper than the engine allows.
    #[error("value nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    /// Any other internal failure, typically raised by a custom rule.
    #[error("{0}")]
    Custom(String),
}

impl InternalError {
    /// Creates a free-form internal error.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

// ============================================================================
// TRANSLATION
// ============================================================================

/// Error raised by a [`Translator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("translation failed: {message}")]
pub struct TranslationError {
    message: String,
}

impl TranslationError {
    /// Creates a translation error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Turns leaf errors into localized strings.
pub trait Translator {
    /// Translates an error recorded under `field` in a set.
    fn translate_field(&self, field: &str, error: &ValidationError)
    -> Result<String, TranslationError>;

    /// Translates an error outside of any set.
    fn translate_single(&self, error: &ValidationError) -> Result<String, TranslationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(message: &'static str) -> Error {
        Error::custom(message)
    }

    #[test]
    fn test_render_substitutes_params() {
        let error = ValidationError::new("range", "must be between {min} and {max}")
            .with_param("min", "1")
            .with_param("max", "10");
        assert_eq!(error.render(), "must be between 1 and 10");
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let error = ValidationError::new("x", "{known} and {unknown}").with_param("known", "a");
        assert_eq!(error.render(), "a and {unknown}");
    }

    #[test]
    fn test_render_without_params_is_verbatim() {
        let error = ValidationError::new("x", "literal {braces}");
        assert_eq!(error.to_string(), "literal {braces}");
    }

    #[test]
    fn test_with_param_upserts_and_with_params_replaces() {
        let error = ValidationError::new("x", "{a}")
            .with_param("a", "1")
            .with_param("a", "2");
        assert_eq!(error.param("a"), Some("2"));
        assert_eq!(error.params().count(), 1);

        let replaced = error.with_params([("b", "3")]);
        assert_eq!(replaced.param("a"), None);
        assert_eq!(replaced.param("b"), Some("3"));
    }

    #[test]
    fn test_setters_do_not_alias_clones() {
        let original = ValidationError::new("code", "message");
        let changed = original.clone().with_code("other").with_message("changed");
        assert_eq!(original.code(), "code");
        assert_eq!(original.message(), "message");
        assert_eq!(changed.code(), "other");
    }

    #[test]
    fn test_set_renders_sorted() {
        let errors = ValidationErrors::new()
            .with("B", leaf("error b"))
            .with("A", leaf("error a"));
        assert_eq!(errors.to_string(), "A: error a; B: error b.");
    }

    #[test]
    fn test_nested_set_renders_in_parentheses() {
        let inner = ValidationErrors::new().with("State", leaf("must be in a valid format"));
        let outer = ValidationErrors::new().with("Address", inner);
        assert_eq!(
            outer.to_string(),
            "Address: (State: must be in a valid format.)."
        );
    }

    #[test]
    fn test_empty_set_renders_empty_string() {
        assert_eq!(ValidationErrors::new().to_string(), "");
    }

    #[test]
    fn test_filter_removes_empty_entries() {
        let mut errors = ValidationErrors::new();
        errors.insert("A", leaf("a"));
        errors.set("B", None);
        let filtered = errors.filter().expect("A remains");
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("A"));
        assert!(!filtered.contains_key("B"));

        let mut only_empty = ValidationErrors::new();
        only_empty.set("A", None);
        assert!(only_empty.filter().is_none());
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let err = ValidationErrors::new()
            .with("A", leaf("a"))
            .into_result()
            .unwrap_err();
        assert!(err.as_nested().is_some());
    }

    #[test]
    fn test_document_form() {
        let inner = ValidationErrors::new().with("C", leaf("c"));
        let errors = ValidationErrors::new()
            .with("A", leaf("a"))
            .with("B", inner)
            .with("D", InternalError::custom("boom"));
        assert_eq!(
            errors.to_document(),
            serde_json::json!({"A": "a", "B": {"C": "c"}, "D": "boom"})
        );
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            errors.to_document()
        );
    }

    #[test]
    fn test_internal_error_messages() {
        assert_eq!(
            InternalError::KeyNotFound("x".into()).to_string(),
            "key \"x\" cannot be found in the map"
        );
        assert_eq!(
            Error::from(InternalError::NotMap { kind: "int" }).to_string(),
            "only a map can be validated, got int"
        );
        assert!(Error::from(InternalError::Cancelled).is_internal());
    }
}
