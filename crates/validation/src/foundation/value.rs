//! The value view rules inspect
//!
//! Rules never see concrete types. They see a [`Kind`], a borrowed snapshot of
//! the shape of a value: nil, a scalar, a string, a sequence of values or a map
//! of keyed values. Capabilities ("this value validates itself") are exposed
//! through explicit queries on [`Value`] instead of runtime type inspection.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::foundation::key::{Key, KeyKind, MapKey};
use crate::foundation::traits::{Validatable, ValidatableWithContext};

// ============================================================================
// VALUE TRAIT
// ============================================================================

/// A value that can be handed to a rule.
///
/// Implemented for the primitive types, strings, sequences, maps, `Option`
/// and the common smart pointers. User types opt in with
/// [`impl_value!`](crate::impl_value), which is also how a type advertises
/// that it validates itself.
pub trait Value {
    /// Returns the shape of this value.
    fn kind(&self) -> Kind<'_>;

    /// Whether the value is absent (`None`, or a wrapper around `None`).
    fn is_nil(&self) -> bool {
        matches!(self.kind(), Kind::Nil)
    }

    /// Whether the value is the empty/zero value of its kind.
    fn is_empty(&self) -> bool {
        self.kind().is_empty()
    }

    /// The self-validation capability, if the value has one.
    fn as_validatable(&self) -> Option<&dyn Validatable> {
        None
    }

    /// The context-aware self-validation capability, if the value has one.
    fn as_validatable_with_context(&self) -> Option<&dyn ValidatableWithContext> {
        None
    }

    /// Access to the concrete value for custom rules that downcast.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

// ============================================================================
// KIND
// ============================================================================

/// The shape of a value as seen by rules.
#[derive(Clone)]
pub enum Kind<'a> {
    /// No value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(&'a str),
    /// An ordered sequence (slice, array, vector).
    Seq(Vec<&'a dyn Value>),
    /// A keyed collection.
    Map(MapView<'a>),
    /// Anything else, typically a struct.
    Opaque,
}

impl<'a> Kind<'a> {
    /// Returns a short name of the kind, used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool(_) => "bool",
            Kind::Int(_) => "int",
            Kind::Uint(_) => "uint",
            Kind::Float(_) => "float",
            Kind::Str(_) => "string",
            Kind::Seq(_) => "sequence",
            Kind::Map(_) => "map",
            Kind::Opaque => "opaque",
        }
    }

    /// Whether this is the empty/zero value of its kind.
    ///
    /// Opaque values are never empty unless the type says otherwise through
    /// [`Value::is_empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Kind::Nil => true,
            Kind::Bool(b) => !b,
            Kind::Int(i) => *i == 0,
            Kind::Uint(u) => *u == 0,
            Kind::Float(f) => *f == 0.0,
            Kind::Str(s) => str::is_empty(s),
            Kind::Seq(items) => items.is_empty(),
            Kind::Map(map) => map.is_empty(),
            Kind::Opaque => false,
        }
    }

    /// Returns the string slice for [`Kind::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Kind::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number of elements of strings (in bytes), sequences and maps.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Kind::Str(s) => Some(s.len()),
            Kind::Seq(items) => Some(items.len()),
            Kind::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Converts a scalar into a comparable key.
    #[must_use]
    pub fn to_key(&self) -> Option<Key> {
        match self {
            Kind::Bool(b) => Some(Key::Bool(*b)),
            Kind::Int(i) => Some(Key::Int(*i)),
            Kind::Uint(u) => Some(Key::Uint(*u)),
            Kind::Str(s) => Some(Key::Str((*s).to_owned().into())),
            _ => None,
        }
    }
}

impl fmt::Debug for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Nil => f.write_str("Nil"),
            Kind::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Kind::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Kind::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Kind::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Kind::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Kind::Seq(items) => f.debug_struct("Seq").field("len", &items.len()).finish(),
            Kind::Map(map) => f
                .debug_struct("Map")
                .field("key_kind", &map.key_kind())
                .field("keys", &map.keys().collect::<Vec<_>>())
                .finish(),
            Kind::Opaque => f.write_str("Opaque"),
        }
    }
}

// ============================================================================
// MAP VIEW
// ============================================================================

/// A borrowed view of a map: its declared key kind and its entries.
///
/// Entries are kept in ascending key order so that iteration is deterministic
/// regardless of the backing collection.
#[derive(Clone)]
pub struct MapView<'a> {
    key_kind: KeyKind,
    entries: Vec<(Key, &'a dyn Value)>,
}

impl<'a> MapView<'a> {
    /// Creates a view, sorting the entries by key.
    #[must_use]
    pub fn new(key_kind: KeyKind, mut entries: Vec<(Key, &'a dyn Value)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { key_kind, entries }
    }

    /// The declared key kind of the map.
    #[must_use]
    pub fn key_kind(&self) -> KeyKind {
        self.key_kind
    }

    /// Looks up an entry by key.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&'a dyn Value> {
        self.entries
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|idx| self.entries[idx].1)
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &'a dyn Value)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// PRIMITIVE IMPLEMENTATIONS
// ============================================================================

impl Value for bool {
    fn kind(&self) -> Kind<'_> {
        Kind::Bool(*self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

macro_rules! value_for_number {
    ($variant:ident as $repr:ty: $($t:ty),*) => {
        $(
            impl Value for $t {
                fn kind(&self) -> Kind<'_> {
                    Kind::$variant(*self as $repr)
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

value_for_number!(Int as i64: i8, i16, i32, i64, isize);
value_for_number!(Uint as u64: u8, u16, u32, u64, usize);
value_for_number!(Float as f64: f32, f64);

impl Value for str {
    fn kind(&self) -> Kind<'_> {
        Kind::Str(self)
    }
}

impl Value for String {
    fn kind(&self) -> Kind<'_> {
        Kind::Str(self.as_str())
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

impl<T: Value> Value for [T] {
    fn kind(&self) -> Kind<'_> {
        Kind::Seq(self.iter().map(|v| v as &dyn Value).collect())
    }
}

impl<T: Value, const N: usize> Value for [T; N] {
    fn kind(&self) -> Kind<'_> {
        self.as_slice().kind()
    }
}

impl<T: Value> Value for Vec<T> {
    fn kind(&self) -> Kind<'_> {
        self.as_slice().kind()
    }
}

impl<K: MapKey, V: Value, S: BuildHasher> Value for HashMap<K, V, S> {
    fn kind(&self) -> Kind<'_> {
        Kind::Map(MapView::new(
            K::KIND,
            self.iter()
                .map(|(k, v)| (k.to_key(), v as &dyn Value))
                .collect(),
        ))
    }
}

impl<K: MapKey, V: Value> Value for BTreeMap<K, V> {
    fn kind(&self) -> Kind<'_> {
        Kind::Map(MapView::new(
            K::KIND,
            self.iter()
                .map(|(k, v)| (k.to_key(), v as &dyn Value))
                .collect(),
        ))
    }
}

// ============================================================================
// WRAPPERS
// ============================================================================

impl<T: Value> Value for Option<T> {
    fn kind(&self) -> Kind<'_> {
        match self {
            Some(v) => v.kind(),
            None => Kind::Nil,
        }
    }

    fn is_nil(&self) -> bool {
        self.as_ref().is_none_or(Value::is_nil)
    }

    fn is_empty(&self) -> bool {
        self.as_ref().is_none_or(Value::is_empty)
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        self.as_ref().and_then(Value::as_validatable)
    }

    fn as_validatable_with_context(&self) -> Option<&dyn ValidatableWithContext> {
        self.as_ref().and_then(Value::as_validatable_with_context)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        self.as_ref().and_then(Value::as_any)
    }
}

macro_rules! value_forwarding {
    ($($wrapper:ty),*) => {
        $(
            impl<T: Value + ?Sized> Value for $wrapper {
                fn kind(&self) -> Kind<'_> {
                    (**self).kind()
                }

                fn is_nil(&self) -> bool {
                    (**self).is_nil()
                }

                fn is_empty(&self) -> bool {
                    (**self).is_empty()
                }

                fn as_validatable(&self) -> Option<&dyn Validatable> {
                    (**self).as_validatable()
                }

                fn as_validatable_with_context(&self) -> Option<&dyn ValidatableWithContext> {
                    (**self).as_validatable_with_context()
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    (**self).as_any()
                }
            }
        )*
    };
}

value_forwarding!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);
