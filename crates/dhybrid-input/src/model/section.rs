//! The [`Section`] trait and the macro that defines every section struct.

use std::fmt;

use crate::codec::InputError;
use crate::schema::{FieldSpec, Value};

/// One named block of the input deck, e.g. `time { dt=..., niter=... }`.
///
/// The trait is object safe so the whole deck can be walked as
/// `&dyn Section` in canonical order by the serializer and the parser.
pub trait Section: fmt::Debug {
    /// Section name as written in the deck.
    fn name(&self) -> &'static str;

    /// Field descriptions in canonical output order.
    fn schema(&self) -> &'static [FieldSpec];

    /// Current value of `field`, or `None` if the section has no such field.
    fn get(&self, field: &str) -> Option<Value>;

    /// Assigns `value` to `field`.
    ///
    /// # Errors
    ///
    /// - [`InputError::UnknownField`] if the section has no such field.
    /// - [`InputError::TypeMismatch`] if `value` cannot represent the field's
    ///   declared type.
    fn set(&mut self, field: &str, value: Value) -> Result<(), InputError>;

    /// Looks up the schema entry for `field`.
    fn field_spec(&self, field: &str) -> Option<&'static FieldSpec> {
        self.schema().iter().find(|spec| spec.name == field)
    }
}

/// Defines a section struct together with its `Default`, schema, [`Section`]
/// and `Display` impls.
///
/// Each field line reads
/// `"key" => rust_name: Type = default, shape, quoting, "comment";`.
/// The key is the name used in the deck, which is not always valid
/// snake_case (`Te`, `B0`).
macro_rules! define_section {
    (
        $(#[$meta:meta])*
        $ty:ident => $section:literal {
            $(
                $key:literal => $field:ident: $fty:ty = $default:expr,
                    $shape:expr, $quoting:expr, $comment:literal;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        pub struct $ty {
            $(
                #[doc = $comment]
                #[serde(rename = $key)]
                pub $field: $fty,
            )+
        }

        impl $ty {
            /// Section name as written in the deck.
            pub const NAME: &'static str = $section;

            /// Field descriptions in canonical output order.
            pub const SCHEMA: &'static [$crate::schema::FieldSpec] = &[
                $(
                    $crate::schema::FieldSpec {
                        name: $key,
                        kind: <$fty as $crate::schema::FieldType>::KIND,
                        shape: $shape,
                        quoting: $quoting,
                        comment: $comment,
                    },
                )+
            ];
        }

        impl Default for $ty {
            fn default() -> Self {
                Self {
                    $( $field: $default, )+
                }
            }
        }

        impl $crate::model::Section for $ty {
            fn name(&self) -> &'static str {
                Self::NAME
            }

            fn schema(&self) -> &'static [$crate::schema::FieldSpec] {
                Self::SCHEMA
            }

            fn get(&self, field: &str) -> Option<$crate::schema::Value> {
                $(
                    if field == $key {
                        return Some($crate::schema::FieldType::to_value(&self.$field));
                    }
                )+
                None
            }

            fn set(
                &mut self,
                field: &str,
                value: $crate::schema::Value,
            ) -> Result<(), $crate::codec::InputError> {
                $(
                    if field == $key {
                        let found = value.kind_name();
                        self.$field = <$fty as $crate::schema::FieldType>::from_value(value)
                            .ok_or_else(|| $crate::codec::InputError::TypeMismatch {
                                section: $section.to_string(),
                                field: field.to_string(),
                                expected: <$fty as $crate::schema::FieldType>::KIND,
                                found,
                            })?;
                        return Ok(());
                    }
                )+
                Err($crate::codec::InputError::UnknownField {
                    section: $section.to_string(),
                    field: field.to_string(),
                })
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::codec::writer::write_section(f, self)
            }
        }
    };
}

pub(crate) use define_section;
