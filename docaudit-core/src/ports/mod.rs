// docaudit-core/src/ports/mod.rs

pub mod parser;

pub use parser::{ParseError, StructuredTextParser};
