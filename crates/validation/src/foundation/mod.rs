//! Foundation types: values, keys, rules, errors and the context.

pub mod context;
pub mod error;
pub mod key;
pub mod traits;
pub mod value;

pub use context::Context;
pub use error::{Error, InternalError, TranslationError, Translator, ValidationError, ValidationErrors};
pub use key::{Key, KeyKind, MapKey};
pub use traits::{Rule, RuleExt, Validatable, ValidatableWithContext};
pub use value::{Kind, MapView, Value};
