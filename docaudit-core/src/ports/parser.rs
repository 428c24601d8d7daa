// docaudit-core/src/ports/parser.rs

// The extractor and the policy loader only know this contract. Whether the text is read by a
// full YAML parser or by the line-oriented fallback is decided once, when the run starts.

use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseError(pub String);

pub trait StructuredTextParser: Send + Sync {
    /// Short identifier used in logs ("yaml", "minimal").
    fn name(&self) -> &'static str;

    /// `false` when the implementation only understands flat `key: value` pairs.
    fn supports_nesting(&self) -> bool;

    fn parse(&self, text: &str) -> Result<Value, ParseError>;
}
