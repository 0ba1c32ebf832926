//! Text codec for the input deck: the serializer, the two-stage parser and
//! the shared error type.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::InputError;
pub use reader::{
    infer_value, parse_document, ParseOptions, RawDocument, RawEntry, RawSection,
    UnknownFieldPolicy,
};
pub use writer::{write_input, write_section, BANNER};
