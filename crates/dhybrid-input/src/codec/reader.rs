//! Parser: deck text → model.
//!
//! Parsing happens in two stages.
//!
//! 1. **Scan** ([`parse_document`]) walks the lines once and produces a
//!    [`RawDocument`]: sections of `key = text` entries, each with a value
//!    guessed from the text's lexical shape ([`infer_value`]).  This stage
//!    knows nothing about the schema.
//! 2. **Build** ([`DHybridInput::from_document`]) looks every entry up in its
//!    section's schema and reads the text as the declared type.  Fields the
//!    deck does not mention keep their defaults.
//!
//! # Scanner states (for beginners)
//!
//! ```text
//!              `{` line                        field line
//!   Outside ───────────────►  Inside(name) ◄──────────────┐
//!      ▲                          │   │                    │
//!      └──────── `}` line ────────┘   └────────────────────┘
//! ```
//!
//! Outside a section, a bare word line (e.g. `time`) is remembered as the name
//! of the next section, because the deck writes the name and the `{` on
//! separate lines.  A `}` while outside is an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, trace, warn};

use crate::codec::error::{io_error, InputError};
use crate::model::{DHybridInput, Section};
use crate::schema::fortran;
use crate::schema::Value;

// ── Raw document ──────────────────────────────────────────────────────────────

/// One `key=value` line as scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Key with any Fortran array slice removed (`ncells(1:2)` → `ncells`).
    pub key: String,
    /// Value text: trimmed, trailing comma and comment removed.
    pub text: String,
    /// Type guessed from the text alone.
    pub value: Value,
    /// 1-based line number.
    pub line: usize,
}

/// One `name { ... }` block as scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub name: String,
    /// 1-based line number of the `{`.
    pub line: usize,
    pub entries: Vec<RawEntry>,
}

impl RawSection {
    /// The last entry for `key`; later lines override earlier ones.
    pub fn entry(&self, key: &str) -> Option<&RawEntry> {
        self.entries.iter().rev().find(|e| e.key == key)
    }
}

/// Untyped view of a deck: every section in file order, including sections
/// the schema does not know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    pub sections: Vec<RawSection>,
}

impl RawDocument {
    /// The last section called `name`; a repeated section replaces earlier
    /// ones entirely.
    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().rev().find(|s| s.name == name)
    }
}

// ── Type inference ────────────────────────────────────────────────────────────

/// Guesses the type of a value from its text.
///
/// Precedence, first match wins:
/// 1. Text with a comma is a tuple: all integers, else all reals, else all
///    logicals, else strings (element quotes are kept).
/// 2. `.true.` / `.false.` is a logical.
/// 3. An integer pattern is an integer.
/// 4. A real pattern is a real.
/// 5. Anything else is a string with one surrounding pair of quotes removed.
///
/// A numeric-looking string (`Ex=0`) therefore comes back as a number; the
/// build stage corrects this using the field's declared type.
pub fn infer_value(text: &str) -> Value {
    if text.contains(',') {
        let pieces: Vec<&str> = text.split(',').map(str::trim).collect();
        if let Some(ints) = all_parse(&pieces, parse_int) {
            return Value::Tuple(ints);
        }
        if let Some(reals) = all_parse(&pieces, |p| fortran::parse_double(p).map(Value::Float)) {
            return Value::Tuple(reals);
        }
        if let Some(bools) = all_parse(&pieces, parse_bool_token) {
            return Value::Tuple(bools);
        }
        return Value::Tuple(pieces.iter().map(|p| Value::Str(p.to_string())).collect());
    }

    if let Some(b) = parse_bool_token(text) {
        return b;
    }
    if let Some(i) = parse_int(text) {
        return i;
    }
    if let Some(x) = fortran::parse_double(text) {
        return Value::Float(x);
    }
    Value::Str(fortran::unquote(text).into_owned())
}

fn all_parse(pieces: &[&str], parse: impl Fn(&str) -> Option<Value>) -> Option<Vec<Value>> {
    pieces.iter().map(|p| parse(*p)).collect()
}

fn parse_int(token: &str) -> Option<Value> {
    if !fortran::is_integer(token) {
        return None;
    }
    token.parse().ok().map(Value::Int)
}

fn parse_bool_token(token: &str) -> Option<Value> {
    match token {
        fortran::TRUE_TOKEN => Some(Value::Bool(true)),
        fortran::FALSE_TOKEN => Some(Value::Bool(false)),
        _ => None,
    }
}

// ── Stage 1: scan ─────────────────────────────────────────────────────────────

/// Scans deck text into a [`RawDocument`].
///
/// # Errors
///
/// - [`InputError::MalformedLine`] for a line inside a section that is not
///   `key=value`.
/// - [`InputError::UnmatchedClose`] for a `}` outside any section.
/// - [`InputError::UnnamedSection`] for a `{` with no name before it.
pub fn parse_document(text: &str) -> Result<RawDocument, InputError> {
    let mut doc = RawDocument::default();
    // Index into `doc.sections` of the open section.
    let mut current: Option<usize> = None;
    let mut pending_name: Option<String> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let content = fortran::strip_comment(raw_line).trim();
        if content.is_empty() {
            continue;
        }

        if let Some(head) = content.strip_suffix('{') {
            let head = head.trim();
            let pending = pending_name.take();
            let name = if head.is_empty() {
                pending.ok_or(InputError::UnnamedSection { line })?
            } else {
                head.to_string()
            };
            if let Some(open) = current {
                debug!(
                    "section `{}` opened at line {line} closes unterminated `{}`",
                    name, doc.sections[open].name
                );
            }
            trace!("section `{name}` opened at line {line}");
            doc.sections.push(RawSection {
                name,
                line,
                entries: Vec::new(),
            });
            current = Some(doc.sections.len() - 1);
        } else if let Some(head) = content.strip_suffix('}') {
            let Some(open) = current.take() else {
                return Err(InputError::UnmatchedClose { line });
            };
            let head = head.trim();
            if !head.is_empty() {
                let entry = scan_field(head, line)?;
                doc.sections[open].entries.push(entry);
            }
        } else if let Some(open) = current {
            let entry = scan_field(content, line)?;
            doc.sections[open].entries.push(entry);
        } else if content.contains('=') {
            // A name only applies to the `{` that directly follows it.
            pending_name = None;
            debug!("dropping field line {line} outside any section: `{content}`");
        } else {
            pending_name = Some(content.to_string());
        }
    }

    if let Some(open) = current {
        warn!(
            "section `{}` opened at line {} is not closed before end of input",
            doc.sections[open].name, doc.sections[open].line
        );
    }
    Ok(doc)
}

/// Splits one field line on its first `=`.
fn scan_field(content: &str, line: usize) -> Result<RawEntry, InputError> {
    let malformed = || InputError::MalformedLine {
        line,
        text: content.to_string(),
    };
    let (key, value) = content.split_once('=').ok_or_else(malformed)?;
    let key = normalize_key(key.trim());
    if key.is_empty() {
        return Err(malformed());
    }
    let value = value.trim();
    let text = value.strip_suffix(',').unwrap_or(value).trim();
    Ok(RawEntry {
        key: key.to_string(),
        text: text.to_string(),
        value: infer_value(text),
        line,
    })
}

/// Drops a Fortran array slice from a key: `ncells(1:2)` → `ncells`.
fn normalize_key(key: &str) -> &str {
    match key.find('(') {
        Some(open) if key.ends_with(')') => key[..open].trim_end(),
        _ => key,
    }
}

// ── Stage 2: build ────────────────────────────────────────────────────────────

/// What to do with a field the schema does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Fail with [`InputError::UnknownField`].
    #[default]
    Reject,
    /// Log a warning and skip the line.
    Ignore,
}

/// Options for building a deck from text.
///
/// Unknown *sections* are always ignored with a warning; the policy only
/// governs unknown fields inside known sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub unknown_fields: UnknownFieldPolicy,
}

impl ParseOptions {
    /// Options that skip unknown fields instead of failing.
    pub fn lenient() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
        }
    }
}

impl DHybridInput {
    /// Reads a deck from `path` with the default (strict) options.
    ///
    /// # Errors
    ///
    /// [`InputError::Io`] if the file cannot be read, otherwise any error of
    /// [`parse_document`] or [`DHybridInput::from_document`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InputError> {
        Self::from_file_with(path, &ParseOptions::default())
    }

    /// Reads a deck from `path`.
    ///
    /// # Errors
    ///
    /// See [`DHybridInput::from_file`].
    pub fn from_file_with(
        path: impl AsRef<Path>,
        options: &ParseOptions,
    ) -> Result<Self, InputError> {
        let path = path.as_ref();
        let mut text = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .map_err(io_error(path))?;

        let doc = parse_document(&text)?;
        let count = doc.sections.len();
        debug!("read {count} sections from {}", path.display());
        Self::from_document(&doc, options)
    }

    /// Builds a deck from a scanned document, reading each entry as its
    /// field's declared type.
    ///
    /// # Errors
    ///
    /// - [`InputError::UnknownField`] under [`UnknownFieldPolicy::Reject`].
    /// - [`InputError::InvalidValue`] if an entry's text does not parse as
    ///   the declared type.
    pub fn from_document(doc: &RawDocument, options: &ParseOptions) -> Result<Self, InputError> {
        let mut input = Self::default();

        for raw in &doc.sections {
            if input.section(&raw.name).is_none() {
                warn!(
                    "ignoring unknown section `{}` at line {}",
                    raw.name, raw.line
                );
            }
        }

        for section in input.sections_mut() {
            if let Some(raw) = doc.section(section.name()) {
                apply_section(section, raw, options)?;
            }
        }
        Ok(input)
    }
}

fn apply_section(
    section: &mut dyn Section,
    raw: &RawSection,
    options: &ParseOptions,
) -> Result<(), InputError> {
    for entry in &raw.entries {
        let Some(spec) = section.field_spec(&entry.key) else {
            match options.unknown_fields {
                UnknownFieldPolicy::Reject => {
                    return Err(InputError::UnknownField {
                        section: raw.name.clone(),
                        field: entry.key.clone(),
                    });
                }
                UnknownFieldPolicy::Ignore => {
                    warn!(
                        "ignoring unknown field `{}.{}` at line {}",
                        raw.name, entry.key, entry.line
                    );
                    continue;
                }
            }
        };

        let Some(value) = spec.coerce(&entry.text) else {
            return Err(InputError::InvalidValue {
                section: raw.name.clone(),
                field: entry.key.clone(),
                text: entry.text.clone(),
                expected: spec.kind,
            });
        };

        if let (Some(arity), Some(items)) = (spec.arity(), value.as_tuple()) {
            if items.len() != arity {
                warn!(
                    "`{}.{}` at line {} has {} values, expected {arity}",
                    raw.name,
                    entry.key,
                    entry.line,
                    items.len()
                );
            }
        }

        section.set(spec.name, value)?;
    }
    Ok(())
}

/// Parses deck text with the default (strict) options.
impl FromStr for DHybridInput {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let doc = parse_document(s)?;
        Self::from_document(&doc, &ParseOptions::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── infer_value ───────────────────────────────────────────────────────────

    #[test]
    fn test_infer_integer_tuple() {
        assert_eq!(
            infer_value("16,16"),
            Value::Tuple(vec![Value::Int(16), Value::Int(16)])
        );
    }

    #[test]
    fn test_infer_mixed_numeric_tuple_is_real() {
        assert_eq!(
            infer_value("1, 0.5"),
            Value::Tuple(vec![Value::Float(1.0), Value::Float(0.5)])
        );
    }

    #[test]
    fn test_infer_logical_tuple() {
        assert_eq!(
            infer_value(".false.,.false.,.true.,.true."),
            Value::Tuple(vec![
                Value::Bool(false),
                Value::Bool(false),
                Value::Bool(true),
                Value::Bool(true),
            ])
        );
    }

    #[test]
    fn test_infer_string_tuple_keeps_element_quotes() {
        assert_eq!(
            infer_value("\"per\",\"open\""),
            Value::Tuple(vec![
                Value::Str("\"per\"".into()),
                Value::Str("\"open\"".into()),
            ])
        );
    }

    #[test]
    fn test_infer_scalars_in_precedence_order() {
        assert_eq!(infer_value(".true."), Value::Bool(true));
        assert_eq!(infer_value("250000"), Value::Int(250_000));
        assert_eq!(infer_value("0.002"), Value::Float(0.002));
        assert_eq!(infer_value("3.05191d-7"), Value::Float(3.05191e-7));
        assert_eq!(infer_value("\"H+\""), Value::Str("H+".into()));
        assert_eq!(infer_value("THERMAL"), Value::Str("THERMAL".into()));
    }

    #[test]
    fn test_infer_numeric_looking_string_is_number() {
        // Lexical inference cannot tell `Ex=0` is a string; the build stage can.
        assert_eq!(infer_value("0"), Value::Int(0));
    }

    // ── parse_document ────────────────────────────────────────────────────────

    #[test]
    fn test_scan_name_on_previous_line() {
        // Arrange
        let text = "! header\ntime\n{\n    dt=0.5, !time step\n}\n";

        // Act
        let doc = parse_document(text).unwrap();

        // Assert
        assert_eq!(doc.sections.len(), 1);
        let time = &doc.sections[0];
        assert_eq!(time.name, "time");
        assert_eq!(time.line, 3);
        assert_eq!(time.entries[0].key, "dt");
        assert_eq!(time.entries[0].text, "0.5");
        assert_eq!(time.entries[0].value, Value::Float(0.5));
        assert_eq!(time.entries[0].line, 4);
    }

    #[test]
    fn test_scan_name_on_same_line() {
        let doc = parse_document("restart {\n  do_restart=.true.\n}\n").unwrap();
        assert_eq!(doc.sections[0].name, "restart");
        assert_eq!(doc.sections[0].entries[0].value, Value::Bool(true));
    }

    #[test]
    fn test_scan_normalizes_array_slice_keys() {
        let doc = parse_document("grid_space\n{\n ncells(1:2)=64,32,\n}\n").unwrap();
        let entry = doc.sections[0].entry("ncells").expect("ncells");
        assert_eq!(entry.text, "64,32");
    }

    #[test]
    fn test_scan_comment_with_quotes_and_commas_is_removed() {
        let doc =
            parse_document("global_output\n{\n units=\"IS\", !\"NORM\", or \"IS\"\n}\n").unwrap();
        assert_eq!(doc.sections[0].entries[0].text, "\"IS\"");
    }

    #[test]
    fn test_scan_unmatched_close_is_error() {
        let err = parse_document("! nothing open\n}\n").unwrap_err();
        assert!(matches!(err, InputError::UnmatchedClose { line: 2 }));
    }

    #[test]
    fn test_scan_double_close_is_error() {
        let err = parse_document("time\n{\n}\n}\n").unwrap_err();
        assert!(matches!(err, InputError::UnmatchedClose { line: 4 }));
    }

    #[test]
    fn test_scan_unnamed_section_is_error() {
        let err = parse_document("{\n dt=1.0\n}\n").unwrap_err();
        assert!(matches!(err, InputError::UnnamedSection { line: 1 }));
    }

    #[test]
    fn test_scan_line_without_equals_is_error() {
        let err = parse_document("time\n{\n    dt 0.5\n}\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::MalformedLine { line: 3, ref text } if text == "dt 0.5"
        ));
    }

    #[test]
    fn test_scan_empty_key_is_error() {
        let err = parse_document("time\n{\n    =0.5\n}\n").unwrap_err();
        assert!(matches!(err, InputError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn test_scan_splits_on_first_equals_only() {
        let doc = parse_document("ext_emf\n{\n Bx=\"b=1\",\n}\n").unwrap();
        assert_eq!(doc.sections[0].entries[0].text, "\"b=1\"");
    }

    #[test]
    fn test_scan_drops_fields_outside_sections() {
        let doc = parse_document("dt=0.5\ntime\n{\n}\n").unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].entries.is_empty());
    }

    #[test]
    fn test_scan_field_before_closing_brace_on_same_line() {
        let doc = parse_document("particles\n{\n num_species=2 }\n").unwrap();
        assert_eq!(doc.sections[0].entries[0].value, Value::Int(2));
    }

    #[test]
    fn test_scan_name_does_not_survive_dropped_field_line() {
        let err = parse_document("stray\nx=1\n{\n dt=1.0\n}\n").unwrap_err();
        assert!(matches!(err, InputError::UnnamedSection { line: 3 }));
    }

    #[test]
    fn test_scan_later_bare_line_replaces_pending_name() {
        let doc = parse_document("stray\ntime\n{\n}\n").unwrap();
        assert_eq!(doc.sections[0].name, "time");
    }

    #[test]
    fn test_scan_keeps_unterminated_trailing_section() {
        let doc = parse_document("particles\n{\n num_species=2\n").unwrap();
        assert_eq!(doc.sections[0].entries.len(), 1);
    }

    #[test]
    fn test_repeated_section_replaces_earlier_one() {
        let doc = parse_document("time\n{\n dt=1.0\n}\ntime\n{\n niter=5\n}\n").unwrap();
        let time = doc.section("time").unwrap();
        assert!(time.entry("dt").is_none());
        assert!(time.entry("niter").is_some());
    }

    // ── from_document ─────────────────────────────────────────────────────────

    #[test]
    fn test_build_uses_declared_type_for_numeric_looking_strings() {
        // Arrange
        let text = "ext_emf\n{\n Ex=0,\n Bx=\"0.\",\n}\n";

        // Act
        let deck: DHybridInput = text.parse().unwrap();

        // Assert
        assert_eq!(deck.ext_emf.ex, "0");
        assert_eq!(deck.ext_emf.bx, "0.");
    }

    #[test]
    fn test_build_reads_real_field_written_as_integer() {
        let deck: DHybridInput = "time\n{\n c=50\n}\n".parse().unwrap();
        assert_eq!(deck.time.c, 50.0);
    }

    #[test]
    fn test_build_invalid_value_is_error() {
        let text = "time\n{\n niter=many\n}\n";
        let err = text.parse::<DHybridInput>().unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidValue { ref section, ref field, .. }
                if section == "time" && field == "niter"
        ));
    }

    #[test]
    fn test_build_unknown_field_rejected_by_default() {
        let err = "time\n{\n warp=9\n}\n".parse::<DHybridInput>().unwrap_err();
        assert!(matches!(
            err,
            InputError::UnknownField { ref section, ref field } if section == "time" && field == "warp"
        ));
    }

    #[test]
    fn test_build_unknown_field_ignored_when_lenient() {
        // Arrange
        let doc = parse_document("time\n{\n warp=9\n niter=3\n}\n").unwrap();

        // Act
        let deck = DHybridInput::from_document(&doc, &ParseOptions::lenient()).unwrap();

        // Assert
        assert_eq!(deck.time.niter, 3);
    }

    #[test]
    fn test_build_ignores_unknown_sections() {
        let deck: DHybridInput = "hyperdrive\n{\n warp=9\n}\ntime\n{\n niter=3\n}\n"
            .parse()
            .unwrap();
        assert_eq!(deck.time.niter, 3);
    }

    #[test]
    fn test_build_last_duplicate_key_wins() {
        let deck: DHybridInput = "time\n{\n niter=1\n niter=2\n}\n".parse().unwrap();
        assert_eq!(deck.time.niter, 2);
    }

    #[test]
    fn test_build_accepts_wrong_arity() {
        let deck: DHybridInput = "node_conf\n{\n node_number=2,2,2\n}\n".parse().unwrap();
        assert_eq!(deck.node_conf.node_number, vec![2, 2, 2]);
    }

    #[test]
    fn test_build_single_element_list() {
        let deck: DHybridInput = "diag_species\n{\n phasespaces=\"p1x1\",\n}\n"
            .parse()
            .unwrap();
        assert_eq!(deck.diag_species.phasespaces, vec!["p1x1".to_string()]);
    }

    #[test]
    fn test_empty_text_is_default_deck() {
        let deck: DHybridInput = "".parse().unwrap();
        assert_eq!(deck, DHybridInput::default());
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = DHybridInput::from_file(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
