//! # dhybrid-input
//!
//! Typed model and text codec for dHybrid input decks.
//!
//! dHybrid is a Fortran hybrid plasma simulation.  It is configured by a plain
//! text "input deck" made of named sections, each holding `key=value` lines
//! written with Fortran literals (`.true.`, `3.05191d-7`, `"H+"`).  This crate
//! builds such decks from Rust values, writes them to disk, and reads them
//! back.
//!
//! # Architecture overview (for beginners)
//!
//! - **`schema`** – What a field looks like: its type, whether it is a tuple,
//!   whether strings are quoted, and the comment written after it.  Also the
//!   Fortran literal syntax in one place.
//!
//! - **`model`** – The sixteen section structs and [`DHybridInput`], the whole
//!   deck.  Every struct field has a default matching the reference setup, so
//!   `DHybridInput::default()` is already a runnable deck.
//!
//! - **`codec`** – Deck text in and out.  Writing walks the schema of each
//!   section; reading scans the text into an untyped [`RawDocument`] and then
//!   reads each entry as its declared type.
//!
//! ```rust
//! use dhybrid_input::{DHybridInput, Time};
//!
//! let deck = DHybridInput {
//!     time: Time { niter: 10, ..Default::default() },
//!     ..Default::default()
//! };
//!
//! let text = deck.to_string();
//! assert!(text.contains("niter=10,"));
//!
//! let parsed: DHybridInput = text.parse()?;
//! assert_eq!(parsed, deck);
//! # Ok::<(), dhybrid_input::InputError>(())
//! ```

pub mod codec;
pub mod model;
pub mod schema;

// Re-export the most-used types at the crate root so callers can write
// `dhybrid_input::Time` instead of `dhybrid_input::model::sections::Time`.
pub use codec::{
    infer_value, parse_document, InputError, ParseOptions, RawDocument, RawEntry, RawSection,
    UnknownFieldPolicy,
};
pub use model::{
    Algorithm, BoundaryConditions, DHybridInput, DiagSpecies, DiagSpeciesTotal, ExtEmf, FieldDiag,
    GlobalOutput, GridSpace, LoadBalance, NodeConf, Particles, RawDiag, Restart, Section, Species,
    Time, TrackDiag, SECTION_COUNT, SECTION_NAMES,
};
pub use schema::{FieldSpec, FieldType, Quoting, ScalarKind, Shape, Value};
