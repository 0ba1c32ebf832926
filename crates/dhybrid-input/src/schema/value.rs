//! Dynamically typed field values.
//!
//! The typed section structs hold plain Rust values (`i64`, `f64`, `Vec<bool>`,
//! ...).  [`Value`] is the untyped currency used where a field is addressed by
//! name at runtime: the generic serializer, the parser, and
//! [`crate::model::Section::set`].  [`FieldType`] converts between the two.

use std::fmt;

use crate::schema::field::ScalarKind;
use crate::schema::fortran;

/// A single field value.
///
/// `Tuple` elements are always scalars; a tuple field never nests.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Tuple(Vec<Value>),
}

impl Value {
    /// Short human-readable name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "real",
            Value::Bool(_) => "logical",
            Value::Str(_) => "string",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Returns the elements of a tuple, or `None` for a scalar.
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

/// Renders the value as a deck literal with strings left unquoted.
///
/// Quoting is a property of the field, not of the value; use
/// [`crate::schema::FieldSpec::format`] when the field is known.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&fortran::format_double(*x)),
            Value::Bool(b) => f.write_str(fortran::format_bool(*b)),
            Value::Str(s) => f.write_str(s),
            Value::Tuple(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

// ── Typed ↔ dynamic conversion ────────────────────────────────────────────────

/// A Rust type that can back a section field.
///
/// Implemented for the four scalar types and for `Vec` of each, which backs
/// both fixed-arity tuples and variable-length lists.
pub trait FieldType: Sized {
    /// Element kind, for tuples the kind of each element.
    const KIND: ScalarKind;

    fn to_value(&self) -> Value;

    /// Converts back from a dynamic value.  Returns `None` when the value's
    /// kind cannot represent `Self`.
    fn from_value(value: Value) -> Option<Self>;
}

impl FieldType for i64 {
    const KIND: ScalarKind = ScalarKind::Int;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl FieldType for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(x),
            // Integers widen: `c=100` in a hand-written deck means 100.0.
            Value::Int(i) => Some(i as f64),
            _ => None,
        }
    }
}

impl FieldType for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FieldType for String {
    const KIND: ScalarKind = ScalarKind::Str;

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    const KIND: ScalarKind = T::KIND;

    fn to_value(&self) -> Value {
        Value::Tuple(self.iter().map(FieldType::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Tuple(items) => items.into_iter().map(T::from_value).collect(),
            // A lone scalar is a one-element tuple.
            scalar => T::from_value(scalar).map(|item| vec![item]),
        }
    }
}
