//! Declarative macros for wiring user types into the engine
//!
//! - [`impl_value!`](crate::impl_value) implements [`Value`](crate::Value)
//!   for a type and declares which self-validation capabilities it has.
//! - [`fields!`](crate::fields) generates a [`StructField`](crate::StructField)
//!   enum for a struct.

// ============================================================================
// IMPL_VALUE MACRO
// ============================================================================

/// Implements [`Value`](crate::Value) for a type.
///
/// Three forms are accepted:
///
/// ```rust,ignore
/// // An opaque value with no capabilities.
/// impl_value!(Money);
///
/// // An opaque value that validates itself.
/// impl_value!(Address: Validatable);
/// impl_value!(Order: Validatable, ValidatableWithContext);
///
/// // A newtype that looks exactly like its inner value (kind, emptiness,
/// // nil-ness), optionally with capabilities of its own.
/// impl_value!(Email => 0: Validatable);
/// ```
///
/// The type must be `'static`.
///
/// # Examples
///
/// ```rust
/// use nebula_validation::prelude::*;
///
/// struct Port(u16);
///
/// impl Validatable for Port {
///     fn validate(&self) -> Result<(), Error> {
///         validate(&self.0, &[&range(1024u16, 65535u16)])
///     }
/// }
///
/// nebula_validation::impl_value!(Port => 0: Validatable);
///
/// assert!(validate(&Port(80), &[]).is_err());
/// assert!(validate(&Port(0), &[&required()]).is_err());
/// assert!(validate(&Port(8080), &[&required()]).is_ok());
/// ```
#[macro_export]
macro_rules! impl_value {
    ($ty:ty) => {
        impl $crate::Value for $ty {
            fn kind(&self) -> $crate::Kind<'_> {
                $crate::Kind::Opaque
            }

            fn as_any(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                ::core::option::Option::Some(self)
            }
        }
    };

    ($ty:ty : $($cap:ident),+ $(,)?) => {
        impl $crate::Value for $ty {
            fn kind(&self) -> $crate::Kind<'_> {
                $crate::Kind::Opaque
            }

            fn as_any(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                ::core::option::Option::Some(self)
            }

            $( $crate::__capability!($cap); )+
        }
    };

    ($ty:ty => $inner:tt $(: $($cap:ident),+ $(,)?)?) => {
        impl $crate::Value for $ty {
            fn kind(&self) -> $crate::Kind<'_> {
                $crate::Value::kind(&self.$inner)
            }

            fn is_nil(&self) -> bool {
                $crate::Value::is_nil(&self.$inner)
            }

            fn is_empty(&self) -> bool {
                $crate::Value::is_empty(&self.$inner)
            }

            fn as_any(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                ::core::option::Option::Some(self)
            }

            $($( $crate::__capability!($cap); )+)?
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __capability {
    (Validatable) => {
        fn as_validatable(&self) -> ::core::option::Option<&dyn $crate::Validatable> {
            ::core::option::Option::Some(self)
        }
    };
    (ValidatableWithContext) => {
        fn as_validatable_with_context(
            &self,
        ) -> ::core::option::Option<&dyn $crate::ValidatableWithContext> {
            ::core::option::Option::Some(self)
        }
    };
}

// ============================================================================
// FIELDS MACRO
// ============================================================================

/// Generates a [`StructField`](crate::StructField) enum for a struct.
///
/// Each entry maps a variant to a field. `as "name"` sets the display tag
/// (an empty tag keeps the declared name). `#[private]` marks a field that
/// must not be validated.
///
/// ```rust
/// use nebula_validation::StructField;
///
/// pub struct Address {
///     street: String,
///     zip: String,
///     internal_id: u64,
/// }
///
/// nebula_validation::fields! {
///     pub enum AddressField for Address {
///         Street => street,
///         Zip => zip as "zip_code",
///         #[private]
///         InternalId => internal_id,
///     }
/// }
///
/// assert_eq!(AddressField::Zip.display_name(), "zip_code");
/// assert_eq!(AddressField::Street.display_name(), "street");
/// assert!(!AddressField::InternalId.is_public());
/// ```
#[macro_export]
macro_rules! fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $target:ty {
            $(
                $(#[$flag:ident])?
                $variant:ident => $field:tt $(as $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant, )*
        }

        impl $crate::StructField for $name {
            type Struct = $target;

            fn all() -> &'static [Self] {
                &[$( Self::$variant, )*]
            }

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($field), )*
                }
            }

            fn tag(self) -> ::core::option::Option<&'static str> {
                match self {
                    $( Self::$variant => $crate::__field_tag!($($tag)?), )*
                }
            }

            fn is_public(self) -> bool {
                match self {
                    $( Self::$variant => $crate::__field_public!($($flag)?), )*
                }
            }

            fn get(self, target: &Self::Struct) -> &dyn $crate::Value {
                match self {
                    $( Self::$variant => &target.$field, )*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_tag {
    () => {
        ::core::option::Option::None
    };
    ($tag:literal) => {
        ::core::option::Option::Some($tag)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_public {
    () => {
        true
    };
    (private) => {
        false
    };
}
