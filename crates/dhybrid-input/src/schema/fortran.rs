//! Literal syntax of the dHybrid input deck.
//!
//! dHybrid is a Fortran program, and its input reader expects Fortran-style
//! literals.  This module is the single place that knows what they look like:
//!
//! | Rust value      | Deck literal                  |
//! |-----------------|-------------------------------|
//! | `true`/`false`  | `.true.` / `.false.`          |
//! | `3.05191e-7`    | `3.05191d-7`                  |
//! | `1e6`           | `1000000.0`                   |
//! | `"H+"` (quoted) | `"H+"`                        |
//!
//! # Why `d` instead of `e`? (for beginners)
//!
//! In Fortran, `1.0e3` is a single-precision constant and `1.0d3` is a
//! double-precision one.  The simulation reads every real as a double, so the
//! deck writes the `d` marker.  When reading, both markers are accepted.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal token for a logical `true`.
pub const TRUE_TOKEN: &str = ".true.";

/// Literal token for a logical `false`.
pub const FALSE_TOKEN: &str = ".false.";

/// Start of a comment, both for whole lines and trailing comments.
pub const COMMENT_MARKER: char = '!';

static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?\d+$").expect("integer pattern is valid"));

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(\d+\.?\d*|\.\d+)([eEdD][-+]?\d+)?$").expect("float pattern is valid")
});

// ── Lexical classification ────────────────────────────────────────────────────

/// Returns `true` if `token` is an optionally signed run of digits.
pub fn is_integer(token: &str) -> bool {
    INTEGER_PATTERN.is_match(token)
}

/// Returns `true` if `token` is a decimal number, with or without a fraction
/// and an `e`/`d` exponent.  Every integer token is also a float token.
pub fn is_float(token: &str) -> bool {
    FLOAT_PATTERN.is_match(token)
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Renders a real as the shortest decimal that reads back to the same `f64`,
/// using `d` as the exponent marker.
///
/// Values in `[1e-4, 1e16)` are written positionally (`0.002`, `1000000.0`),
/// everything else in exponent form (`3.05191d-7`).
///
/// Infinities and NaN come out as `inf` / `NaN`, which [`parse_double`] does
/// not accept; `DHybridInput::to_file` refuses to write them.
pub fn format_double(value: f64) -> String {
    // `{:?}` is the shortest round-trip representation and always keeps a
    // fractional part or an exponent, so the token never reads as an integer.
    format!("{value:?}").replace('e', "d")
}

/// Renders a logical as `.true.` or `.false.`.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        TRUE_TOKEN
    } else {
        FALSE_TOKEN
    }
}

/// Wraps `text` in double quotes, doubling any embedded quote (`a"b` →
/// `"a""b"`).
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Parses a real written with either exponent marker.
///
/// Returns `None` when `token` is not a decimal number.
pub fn parse_double(token: &str) -> Option<f64> {
    if !is_float(token) {
        return None;
    }
    token.replace(['d', 'D'], "e").parse().ok()
}

/// Parses a logical.  Accepts the long and short Fortran forms in any case
/// (`.true.`, `.T.`, `.false.`, `.f.`).
pub fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        ".true." | ".t." => Some(true),
        ".false." | ".f." => Some(false),
        _ => None,
    }
}

/// Strips one leading and one trailing double quote, each only if present.
///
/// When both are present the inner text is read as a Fortran string
/// constant, so a doubled quote collapses to one.
pub fn unquote(text: &str) -> Cow<'_, str> {
    let inner = text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"'));
    match inner {
        Some(inner) if inner.contains("\"\"") => Cow::Owned(inner.replace("\"\"", "\"")),
        Some(inner) => Cow::Borrowed(inner),
        None => {
            let text = text.strip_prefix('"').unwrap_or(text);
            Cow::Borrowed(text.strip_suffix('"').unwrap_or(text))
        }
    }
}

/// Removes a trailing `!comment`.  Markers inside double quotes are part of
/// the value and are kept.  A doubled quote toggles twice, so it never ends
/// the quoted run.
pub fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            COMMENT_MARKER if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Splits `text` on commas that are not inside double quotes and trims each
/// piece.
pub fn split_list(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                pieces.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(text[start..].trim());
    pieces
}
