//! Field schema shared by the model and the codec.
//!
//! - **`field`** – [`FieldSpec`]: name, type, shape, quoting and comment of
//!   one field.  Sections are described as static arrays of these.
//! - **`value`** – [`Value`], the dynamically typed field value, and the
//!   [`FieldType`] bridge to the typed section structs.
//! - **`fortran`** – the literal syntax the simulation program reads
//!   (`.true.`, `1.0d-3`, quoted strings) and the lexical patterns used to
//!   recognise it.

pub mod field;
pub mod fortran;
pub mod value;

pub use field::{FieldSpec, Quoting, ScalarKind, Shape};
pub use value::{FieldType, Value};
