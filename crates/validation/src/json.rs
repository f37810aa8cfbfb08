//! JSON documents as values
//!
//! With the `json` feature, a [`serde_json::Value`] can be validated like
//! any other value: objects are maps with string keys, arrays are
//! sequences and `null` is nil.
//!
//! # Examples
//!
//! ```
//! use nebula_validation::prelude::*;
//! use serde_json::json;
//!
//! let doc = json!({ "name": "", "tags": ["a", "b"] });
//! let err = validate_map(&doc, [
//!     key("name", &[&required()]),
//!     key("tags", &[&length(1, 5)]),
//! ])
//! .unwrap_err();
//! assert_eq!(err.to_string(), "name: cannot be blank.");
//! ```

use std::any::Any;

use crate::foundation::{Key, KeyKind, Kind, MapView, Value};

impl Value for serde_json::Value {
    fn kind(&self) -> Kind<'_> {
        match self {
            Self::Null => Kind::Nil,
            Self::Bool(b) => Kind::Bool(*b),
            Self::Number(n) => number_kind(n),
            Self::String(s) => Kind::Str(s),
            Self::Array(items) => Kind::Seq(items.iter().map(|v| v as &dyn Value).collect()),
            Self::Object(fields) => Kind::Map(MapView::new(
                KeyKind::Str,
                fields
                    .iter()
                    .map(|(k, v)| (Key::from(k.clone()), v as &dyn Value))
                    .collect(),
            )),
        }
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

fn number_kind(n: &serde_json::Number) -> Kind<'static> {
    if let Some(u) = n.as_u64() {
        Kind::Uint(u)
    } else if let Some(i) = n.as_i64() {
        Kind::Int(i)
    } else if let Some(f) = n.as_f64() {
        Kind::Float(f)
    } else {
        Kind::Opaque
    }
}
