//! Typed map keys
//!
//! Map keys are compared by value within their kind. A `HashMap<i32, _>`
//! reports [`KeyKind::Int`], so a key rule written as `"11"` is a wrong-type
//! key rather than a missing one.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// KEY KIND
// ============================================================================

/// The declared key type of a map, reduced to the kinds a key can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// `bool` keys.
    Bool,
    /// Signed integer keys.
    Int,
    /// Unsigned integer keys.
    Uint,
    /// String keys.
    Str,
}

impl KeyKind {
    /// Returns a short, human-readable name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            KeyKind::Bool => "bool",
            KeyKind::Int => "int",
            KeyKind::Uint => "uint",
            KeyKind::Str => "string",
        }
    }
}

// ============================================================================
// KEY
// ============================================================================

/// A map key value.
///
/// Keys render with their plain formatting (`Display`), which is also the
/// name used for the key in a [`ValidationErrors`](crate::ValidationErrors) set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// A boolean key.
    Bool(bool),
    /// A signed integer key.
    Int(i64),
    /// An unsigned integer key.
    Uint(u64),
    /// A string key.
    Str(Cow<'static, str>),
}

impl Key {
    /// Returns the kind of this key.
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Bool(_) => KeyKind::Bool,
            Key::Int(_) => KeyKind::Int,
            Key::Uint(_) => KeyKind::Uint,
            Key::Str(_) => KeyKind::Str,
        }
    }

    /// Compares two keys, treating signed and unsigned integers as numbers.
    ///
    /// Used by list membership checks where the literal type of the allowed
    /// value should not matter (`in_list([1, 2])` accepts a `u8` of `1`).
    #[must_use]
    pub fn loosely_eq(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Int(a), Key::Uint(b)) | (Key::Uint(b), Key::Int(a)) => {
                i128::from(*a) == i128::from(*b)
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{b}"),
            Key::Int(i) => write!(f, "{i}"),
            Key::Uint(u) => write!(f, "{u}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&'static str> for Key {
    fn from(value: &'static str) -> Self {
        Key::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(Cow::Owned(value))
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

macro_rules! key_from_int {
    ($variant:ident as $repr:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(value: $t) -> Self {
                    Key::$variant(value as $repr)
                }
            }
        )*
    };
}

key_from_int!(Int as i64: i8, i16, i32, i64, isize);
key_from_int!(Uint as u64: u8, u16, u32, u64, usize);

// ============================================================================
// MAP KEY TRAIT
// ============================================================================

/// Types usable as keys of a validated map.
pub trait MapKey {
    /// The kind every key of this type has.
    const KIND: KeyKind;

    /// Converts the key into its comparable form.
    fn to_key(&self) -> Key;
}

impl MapKey for String {
    const KIND: KeyKind = KeyKind::Str;

    fn to_key(&self) -> Key {
        Key::Str(Cow::Owned(self.clone()))
    }
}

impl MapKey for &str {
    const KIND: KeyKind = KeyKind::Str;

    fn to_key(&self) -> Key {
        Key::Str(Cow::Owned((*self).to_owned()))
    }
}

impl MapKey for bool {
    const KIND: KeyKind = KeyKind::Bool;

    fn to_key(&self) -> Key {
        Key::Bool(*self)
    }
}

macro_rules! map_key_int {
    ($kind:ident: $($t:ty),*) => {
        $(
            impl MapKey for $t {
                const KIND: KeyKind = KeyKind::$kind;

                fn to_key(&self) -> Key {
                    Key::from(*self)
                }
            }
        )*
    };
}

map_key_int!(Int: i8, i16, i32, i64, isize);
map_key_int!(Uint: u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_plain_formatting() {
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(Key::from(-11).to_string(), "-11");
        assert_eq!(Key::from(22u8).to_string(), "22");
        assert_eq!(Key::from(true).to_string(), "true");
    }

    #[test]
    fn test_kind_follows_literal_type() {
        assert_eq!(Key::from(1i32).kind(), KeyKind::Int);
        assert_eq!(Key::from(1usize).kind(), KeyKind::Uint);
        assert_eq!(<String as MapKey>::KIND, KeyKind::Str);
    }

    #[test]
    fn test_equality_is_strict_across_kinds() {
        assert_ne!(Key::from(1i32), Key::from(1u32));
        assert!(Key::from(1i32).loosely_eq(&Key::from(1u32)));
        assert!(!Key::from(-1i32).loosely_eq(&Key::from(u64::MAX)));
        assert_eq!(Key::from("a"), Key::from("a".to_string()));
    }
}
