//! Declarative description of one section field.
//!
//! Every section publishes a `&'static [FieldSpec]` in canonical order.  The
//! serializer and the schema-aware parser are driven entirely by these
//! entries, so adding a field to a section means adding one line to its
//! definition and nothing else.

use std::fmt;

use crate::schema::fortran;
use crate::schema::value::Value;

/// Type of a scalar, or of each element of a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Float,
    Bool,
    Str,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScalarKind::Int => "integer",
            ScalarKind::Float => "real",
            ScalarKind::Bool => "logical",
            ScalarKind::Str => "string",
        })
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One value.
    Scalar,
    /// Exactly this many comma-separated values (e.g. one per dimension).
    Tuple(usize),
    /// Any number of comma-separated values.
    List,
}

/// Whether string values are wrapped in double quotes on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    Bare,
    Quoted,
}

/// Schema entry for one field.
///
/// The default value is not stored here; it lives in the section's `Default`
/// impl and is available through [`crate::model::Section::get`] on a default
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key as written in the deck (e.g. `"Te"`, `"node_number"`).
    pub name: &'static str,
    pub kind: ScalarKind,
    pub shape: Shape,
    /// Only meaningful for [`ScalarKind::Str`].
    pub quoting: Quoting,
    /// Re-emitted after the value on every serialization.
    pub comment: &'static str,
}

impl FieldSpec {
    /// Declared number of elements for fixed-arity tuples.
    pub fn arity(&self) -> Option<usize> {
        match self.shape {
            Shape::Tuple(n) => Some(n),
            Shape::Scalar | Shape::List => None,
        }
    }

    /// Renders `value` as it appears to the right of `key=` in the deck.
    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Tuple(items) => items
                .iter()
                .map(|item| self.format(item))
                .collect::<Vec<_>>()
                .join(","),
            Value::Str(s) if self.quoting == Quoting::Quoted => fortran::quote(s),
            scalar => scalar.to_string(),
        }
    }

    /// Reads the text to the right of `key=` as this field's declared type.
    ///
    /// Unlike lexical inference, the declared type decides: `"0"` in a string
    /// field stays a string, quoted tuple elements are unquoted, and a comma
    /// inside quotes does not split.  Empty text in a tuple field is the empty
    /// tuple.  Returns `None` if any element does not parse as the declared
    /// kind.
    pub fn coerce(&self, text: &str) -> Option<Value> {
        let text = text.trim();
        match self.shape {
            Shape::Scalar => parse_scalar(self.kind, text),
            Shape::Tuple(_) | Shape::List if text.is_empty() => Some(Value::Tuple(Vec::new())),
            Shape::Tuple(_) | Shape::List => fortran::split_list(text)
                .into_iter()
                .map(|token| parse_scalar(self.kind, token))
                .collect::<Option<Vec<_>>>()
                .map(Value::Tuple),
        }
    }
}

fn parse_scalar(kind: ScalarKind, token: &str) -> Option<Value> {
    match kind {
        ScalarKind::Int => {
            if !fortran::is_integer(token) {
                return None;
            }
            token.parse().ok().map(Value::Int)
        }
        ScalarKind::Float => fortran::parse_double(token).map(Value::Float),
        ScalarKind::Bool => fortran::parse_bool(token).map(Value::Bool),
        ScalarKind::Str => Some(Value::Str(fortran::unquote(token).into_owned())),
    }
}
