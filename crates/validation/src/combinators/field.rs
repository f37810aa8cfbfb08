//! FIELD rules - per-field validation of structs
//!
//! Fields are identified through a [`StructField`] enum, usually generated
//! by [`fields!`](crate::fields). Each variant knows its declared name, an
//! optional display tag, whether the field is public and how to borrow it,
//! so the same name in an embedded struct can never be confused with the
//! outer one.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::prelude::*;
//!
//! struct Login {
//!     user: String,
//!     password: String,
//! }
//!
//! nebula_validation::fields! {
//!     enum LoginField for Login {
//!         User => user as "username",
//!         Password => password,
//!     }
//! }
//!
//! let login = Login { user: String::new(), password: "x".into() };
//! let err = validate_struct(&login, [
//!     field(LoginField::User, &[&required()]),
//!     field(LoginField::Password, &[&required(), &length(8, 64)]),
//! ])
//! .unwrap_err();
//!
//! assert_eq!(
//!     err.to_string(),
//!     "password: the length must be between 8 and 64; username: cannot be blank."
//! );
//! ```

use std::fmt;

use crate::engine;
use crate::foundation::{Context, Error, InternalError, Rule, ValidationErrors, Value};

// ============================================================================
// FIELD IDENTITY
// ============================================================================

/// Identifies one field of a struct.
pub trait StructField: Copy + 'static {
    /// The struct the field belongs to.
    type Struct;

    /// Every field of the struct, in declaration order.
    fn all() -> &'static [Self];

    /// The declared field name.
    fn name(self) -> &'static str;

    /// The display-name override, if any.
    fn tag(self) -> Option<&'static str> {
        None
    }

    /// Whether the field may be validated.
    fn is_public(self) -> bool {
        true
    }

    /// Borrows the field from a struct value.
    fn get(self, target: &Self::Struct) -> &dyn Value;

    /// The name errors for this field are reported under: the tag unless it
    /// is missing or empty, otherwise the declared name.
    fn display_name(self) -> &'static str {
        match self.tag() {
            Some(tag) if !tag.is_empty() => tag,
            _ => self.name(),
        }
    }
}

// ============================================================================
// FIELD RULES
// ============================================================================

#[derive(Clone, Copy)]
enum FieldRef<'a, F> {
    Id(F),
    Named(&'a str),
}

/// The rules for one struct field.
#[derive(Clone, Copy)]
pub struct FieldRules<'a, F> {
    field: FieldRef<'a, F>,
    rules: &'a [&'a dyn Rule],
}

impl<'a, F: StructField> FieldRules<'a, F> {
    /// Associates rules with a field.
    pub fn new(field: F, rules: &'a [&'a dyn Rule]) -> Self {
        Self {
            field: FieldRef::Id(field),
            rules,
        }
    }

    /// Associates rules with a field looked up by declared name when
    /// validation runs.
    pub fn named(name: &'a str, rules: &'a [&'a dyn Rule]) -> Self {
        Self {
            field: FieldRef::Named(name),
            rules,
        }
    }

    fn resolve(&self, index: usize) -> Result<F, InternalError> {
        match self.field {
            FieldRef::Id(field) => Ok(field),
            FieldRef::Named(name) => F::all()
                .iter()
                .copied()
                .find(|field| field.name() == name)
                .ok_or_else(|| InternalError::FieldNotFound {
                    index,
                    name: name.to_owned(),
                }),
        }
    }
}

impl<F: StructField> fmt::Debug for FieldRules<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.field {
            FieldRef::Id(field) => field.name(),
            FieldRef::Named(name) => name,
        };
        f.debug_struct("FieldRules")
            .field("field", &name)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Creates [`FieldRules`] for one field.
pub fn field<'a, F: StructField>(field: F, rules: &'a [&'a dyn Rule]) -> FieldRules<'a, F> {
    FieldRules::new(field, rules)
}

// ============================================================================
// STRUCT RULES
// ============================================================================

/// Field rules bound to a struct value.
///
/// Fields are validated in the order they were added. Errors are keyed by
/// [`StructField::display_name`]. A field that cannot be resolved or is not
/// public aborts validation with an [`InternalError`].
pub struct StructRules<'a, F: StructField> {
    target: &'a F::Struct,
    fields: Vec<FieldRules<'a, F>>,
    only: Option<Vec<&'a str>>,
}

impl<'a, F: StructField> StructRules<'a, F> {
    /// Starts an empty rule set for `target`.
    pub fn new(target: &'a F::Struct) -> Self {
        Self {
            target,
            fields: Vec::new(),
            only: None,
        }
    }

    /// Adds field rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn add(mut self, rules: FieldRules<'a, F>) -> Self {
        self.fields.push(rules);
        self
    }

    /// Adds rules for a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(self, field: F, rules: &'a [&'a dyn Rule]) -> Self {
        self.add(FieldRules::new(field, rules))
    }

    /// Adds rules for a field named at validation time.
    #[must_use = "builder methods must be chained or built"]
    pub fn add_named(self, name: &'a str, rules: &'a [&'a dyn Rule]) -> Self {
        self.add(FieldRules::named(name, rules))
    }

    /// Restricts validation to fields whose declared name is listed.
    #[must_use = "builder methods must be chained or built"]
    pub fn only(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.only = Some(names.into_iter().collect());
        self
    }

    /// Validates the struct.
    pub fn validate(&self) -> Result<(), Error> {
        self.run(None)
    }

    /// Validates the struct with a context.
    pub fn validate_with_context(&self, ctx: &Context) -> Result<(), Error> {
        self.run(Some(ctx))
    }

    fn run(&self, ctx: Option<&Context>) -> Result<(), Error> {
        let mut errors = ValidationErrors::new();

        for (index, rules) in self.fields.iter().enumerate() {
            let field = rules.resolve(index)?;
            if let Some(only) = &self.only
                && !only.contains(&field.name())
            {
                continue;
            }
            if !field.is_public() {
                return Err(InternalError::FieldNotExported(field.name().to_owned()).into());
            }

            let value = field.get(self.target);
            let result = match ctx {
                Some(ctx) => {
                    ctx.check()?;
                    engine::validate_with_context(ctx, value, rules.rules)
                }
                None => engine::validate(value, rules.rules),
            };
            match result {
                Ok(()) => {}
                Err(Error::Internal(internal)) => {
                    tracing::debug!(
                        field = field.name(),
                        error = %internal,
                        "struct validation aborted"
                    );
                    return Err(internal.into());
                }
                Err(error) => errors.insert(field.display_name(), error),
            }
        }

        errors.into_result()
    }
}

impl<F: StructField> fmt::Debug for StructRules<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructRules")
            .field("fields", &self.fields)
            .field("only", &self.only)
            .finish_non_exhaustive()
    }
}

/// Validates the listed fields of a struct.
pub fn validate_struct<'a, F: StructField>(
    target: &'a F::Struct,
    fields: impl IntoIterator<Item = FieldRules<'a, F>>,
) -> Result<(), Error> {
    fields
        .into_iter()
        .fold(StructRules::new(target), StructRules::add)
        .validate()
}

/// Context-aware counterpart of [`validate_struct`].
pub fn validate_struct_with_context<'a, F: StructField>(
    ctx: &Context,
    target: &'a F::Struct,
    fields: impl IntoIterator<Item = FieldRules<'a, F>>,
) -> Result<(), Error> {
    fields
        .into_iter()
        .fold(StructRules::new(target), StructRules::add)
        .validate_with_context(ctx)
}
