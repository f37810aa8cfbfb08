//! MAP rules - per-key validation of maps
//!
//! A [`MapRules`] names the keys to validate and the rules for each. Keys
//! are typed: a key of the wrong kind or a key missing from the map is a
//! setup error and aborts validation with an [`InternalError`]. Keys of the
//! map not named in the rules are tolerated unless the rules are made
//! [exhaustive](MapRules::exhaustive).
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::prelude::*;
//! use std::collections::HashMap;
//!
//! let data = HashMap::from([("name", "Ann"), ("email", "")]);
//!
//! let err = validate_map(&data, [
//!     key("name", &[&required()]),
//!     key("email", &[&required()]),
//! ])
//! .unwrap_err();
//! assert_eq!(err.to_string(), "email: cannot be blank.");
//! ```

use std::fmt;

use crate::engine;
use crate::foundation::{Context, Error, InternalError, Key, Kind, Rule, ValidationErrors, Value};
use crate::validators::ErrorTemplate;

// ============================================================================
// KEY RULES
// ============================================================================

/// The rules for one map key.
#[derive(Clone)]
pub struct KeyRules<'a> {
    key: Key,
    rules: &'a [&'a dyn Rule],
}

impl<'a> KeyRules<'a> {
    /// Associates rules with a key.
    pub fn new(key: impl Into<Key>, rules: &'a [&'a dyn Rule]) -> Self {
        Self {
            key: key.into(),
            rules,
        }
    }

    /// The key these rules apply to.
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }
}

impl fmt::Debug for KeyRules<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRules")
            .field("key", &self.key)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Creates [`KeyRules`] for one key.
pub fn key<'a>(key: impl Into<Key>, rules: &'a [&'a dyn Rule]) -> KeyRules<'a> {
    KeyRules::new(key, rules)
}

// ============================================================================
// MAP RULES
// ============================================================================

/// Per-key rules for a map. Also usable as a [`Rule`], so maps nest.
#[derive(Debug, Clone)]
pub struct MapRules<'a> {
    keys: Vec<KeyRules<'a>>,
    exhaustive: bool,
}

impl<'a> MapRules<'a> {
    /// Creates map rules from key rules. Extra keys are tolerated.
    pub fn new(keys: impl IntoIterator<Item = KeyRules<'a>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            exhaustive: false,
        }
    }

    /// Reports every map key that has no key rules as unexpected.
    #[must_use = "builder methods must be chained or built"]
    pub fn exhaustive(mut self) -> Self {
        self.exhaustive = true;
        self
    }

    /// Tolerates map keys that have no key rules. This is the default.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_extra_keys(mut self) -> Self {
        self.exhaustive = false;
        self
    }

    /// Validates a map.
    pub fn validate_map(&self, value: &dyn Value) -> Result<(), Error> {
        self.run(None, value)
    }

    /// Validates a map with a context.
    pub fn validate_map_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        self.run(Some(ctx), value)
    }

    fn run(&self, ctx: Option<&Context>, value: &dyn Value) -> Result<(), Error> {
        if value.is_nil() {
            return Ok(());
        }
        let kind = value.kind();
        let Kind::Map(map) = &kind else {
            return Err(InternalError::NotMap { kind: kind.name() }.into());
        };

        let mut errors = ValidationErrors::new();
        for rules in &self.keys {
            let name = rules.key.to_string();
            if rules.key.kind() != map.key_kind() {
                return Err(InternalError::KeyWrongType(name).into());
            }
            let Some(entry) = map.get(&rules.key) else {
                return Err(InternalError::KeyNotFound(name).into());
            };

            let result = match ctx {
                Some(ctx) => {
                    ctx.check()?;
                    engine::validate_with_context(ctx, entry, rules.rules)
                }
                None => engine::validate(entry, rules.rules),
            };
            match result {
                Ok(()) => {}
                Err(Error::Internal(internal)) => {
                    tracing::debug!(key = %name, error = %internal, "map validation aborted");
                    return Err(internal.into());
                }
                Err(error) => errors.insert(name, error),
            }
        }

        if self.exhaustive {
            let unexpected = ErrorTemplate::new("validation_key_unexpected", "key not expected");
            for extra in map
                .keys()
                .filter(|k| !self.keys.iter().any(|rules| rules.key == **k))
            {
                errors.insert(extra.to_string(), unexpected.failure());
            }
        }

        errors.into_result()
    }
}

impl Rule for MapRules<'_> {
    fn validate(&self, value: &dyn Value) -> Result<(), Error> {
        self.validate_map(value)
    }

    fn validate_with_context(&self, ctx: &Context, value: &dyn Value) -> Result<(), Error> {
        self.validate_map_with_context(ctx, value)
    }
}

/// Creates [`MapRules`] from key rules.
pub fn map_rules<'a>(keys: impl IntoIterator<Item = KeyRules<'a>>) -> MapRules<'a> {
    MapRules::new(keys)
}

/// Validates a map against key rules, tolerating extra keys.
pub fn validate_map<'a>(
    value: &dyn Value,
    keys: impl IntoIterator<Item = KeyRules<'a>>,
) -> Result<(), Error> {
    MapRules::new(keys).validate_map(value)
}

/// Context-aware counterpart of [`validate_map`].
pub fn validate_map_with_context<'a>(
    ctx: &Context,
    value: &dyn Value,
    keys: impl IntoIterator<Item = KeyRules<'a>>,
) -> Result<(), Error> {
    MapRules::new(keys).validate_map_with_context(ctx, value)
}
