//! Serializer: model → deck text.
//!
//! Output layout:
//! ```text
//! ! dHybrid input file v 2.2
//! ! Created by the dhybrid-input crate
//! !---------- node conf ----------
//! node_conf
//! {
//!     node_number=16,16, !num of processes in each dimension
//! }
//! !---------- time ----------
//! time
//! {
//!     dt=0.002, !time step
//!     ...
//! }
//! ```
//! One generic loop renders every section from its schema; no section has
//! hand-written formatting.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::codec::error::{io_error, InputError};
use crate::model::{DHybridInput, Section, SECTION_COUNT};
use crate::schema::fortran::COMMENT_MARKER;
use crate::schema::Value;

/// The two banner lines written at the top of every deck.
pub const BANNER: [&str; 2] = [
    "! dHybrid input file v 2.2",
    "! Created by the dhybrid-input crate",
];

/// Indentation of field lines inside a section block.
const FIELD_INDENT: &str = "    ";

/// Writes one section block: name line, `{`, one line per field, `}`.
pub fn write_section<W: fmt::Write + ?Sized>(out: &mut W, section: &dyn Section) -> fmt::Result {
    writeln!(out, "{}", section.name())?;
    writeln!(out, "{{")?;
    for spec in section.schema() {
        let Some(value) = section.get(spec.name) else {
            continue;
        };
        write!(out, "{FIELD_INDENT}{}={},", spec.name, spec.format(&value))?;
        if !spec.comment.is_empty() {
            write!(out, " {COMMENT_MARKER}{}", spec.comment)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "}}")
}

/// Writes the whole deck: banner, then each section preceded by a comment
/// line naming it.
pub fn write_input<W: fmt::Write + ?Sized>(out: &mut W, input: &DHybridInput) -> fmt::Result {
    for line in BANNER {
        writeln!(out, "{line}")?;
    }
    for section in input.sections() {
        writeln!(
            out,
            "{COMMENT_MARKER}---------- {} ----------",
            section.name().replace('_', " ")
        )?;
        write_section(out, section)?;
    }
    Ok(())
}

/// Fails on the first real, or real tuple element, that is not finite.
fn check_finite(input: &DHybridInput) -> Result<(), InputError> {
    for section in input.sections() {
        for spec in section.schema() {
            let Some(value) = section.get(spec.name) else {
                continue;
            };
            let finite = match &value {
                Value::Float(x) => x.is_finite(),
                Value::Tuple(items) => items.iter().all(|item| match item {
                    Value::Float(x) => x.is_finite(),
                    _ => true,
                }),
                _ => true,
            };
            if !finite {
                return Err(InputError::NonFinite {
                    section: section.name().to_string(),
                    field: spec.name.to_string(),
                });
            }
        }
    }
    Ok(())
}

impl fmt::Display for DHybridInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_input(f, self)
    }
}

impl DHybridInput {
    /// Writes the deck to `path`, creating or truncating the file.
    ///
    /// The file is written in place; a failure part-way leaves a truncated
    /// file behind.
    ///
    /// # Errors
    ///
    /// - [`InputError::NonFinite`] if a real field holds `inf` or `NaN`.  The
    ///   file is not touched.
    /// - [`InputError::Io`] if the file cannot be created or written.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), InputError> {
        let path = path.as_ref();
        check_finite(self)?;
        let text = self.to_string();

        let file = File::create(path).map_err(io_error(path))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes()).map_err(io_error(path))?;
        writer.flush().map_err(io_error(path))?;

        debug!(
            "wrote {SECTION_COUNT} sections ({} bytes) to {}",
            text.len(),
            path.display()
        );
        Ok(())
    }
}
