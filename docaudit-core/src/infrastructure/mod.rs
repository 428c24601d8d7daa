// docaudit-core/src/infrastructure/mod.rs

pub mod activity_log;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod parser;

pub use parser::{LineParser, ParserKind, YamlParser};
