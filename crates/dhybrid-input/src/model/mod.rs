//! Typed model of a dHybrid input deck.
//!
//! The deck is a fixed, ordered list of sections; each section is a flat
//! record of named fields with a declared type, a default and a comment.
//!
//! - **`section`** – the object-safe [`Section`] trait implemented by every
//!   section, and the `define_section!` macro that generates the structs.
//! - **`sections`** – the sixteen section structs.
//! - **`input`** – [`DHybridInput`], the aggregate of all sections.
//!
//! Sections are ordinary structs with public fields, so the usual way to
//! override a default is struct-update syntax.  The name-based
//! [`Section::get`] / [`Section::set`] pair exists for the codec and for
//! callers that address fields at runtime.

pub mod input;
pub mod section;
pub mod sections;

pub use input::{DHybridInput, SECTION_COUNT, SECTION_NAMES};
pub use section::Section;
pub use sections::{
    Algorithm, BoundaryConditions, DiagSpecies, DiagSpeciesTotal, ExtEmf, FieldDiag, GlobalOutput,
    GridSpace, LoadBalance, NodeConf, Particles, RawDiag, Restart, Species, Time, TrackDiag,
};
