//! Error type shared by the model setters and both codec directions.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::schema::ScalarKind;

/// Errors raised while building, reading or writing an input deck.
///
/// Every error aborts the whole operation; there is no partial result.
#[derive(Debug, Error)]
pub enum InputError {
    /// The deck file could not be opened, read, created or written.
    #[error("I/O error accessing input deck at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line inside a section is not of the form `key=value`.
    #[error("line {line}: expected `key=value`, found `{text}`")]
    MalformedLine { line: usize, text: String },

    /// A `}` appeared with no open section.
    #[error("line {line}: `}}` without a matching section opener")]
    UnmatchedClose { line: usize },

    /// A `{` appeared with no section name before it.
    #[error("line {line}: `{{` without a section name")]
    UnnamedSection { line: usize },

    /// The section exists in the schema but has no such field.
    #[error("unknown field `{field}` in section `{section}`")]
    UnknownField { section: String, field: String },

    /// The section name is not part of the schema.
    #[error("unknown section `{section}`")]
    UnknownSection { section: String },

    /// The text of a field could not be read as the field's declared type.
    #[error("invalid value `{text}` for `{section}.{field}`: expected {expected}")]
    InvalidValue {
        section: String,
        field: String,
        text: String,
        expected: ScalarKind,
    },

    /// A real field holds `inf` or `NaN`, which the deck syntax cannot express.
    #[error("`{section}.{field}` is not a finite real and cannot be written")]
    NonFinite { section: String, field: String },

    /// A dynamic value of the wrong kind was assigned to a field.
    #[error("cannot assign a {found} to `{section}.{field}`: expected {expected}")]
    TypeMismatch {
        section: String,
        field: String,
        expected: ScalarKind,
        found: &'static str,
    },
}

/// Builds a `map_err` adapter that attaches `path` to an I/O error.
pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> InputError + '_ {
    move |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    }
}
