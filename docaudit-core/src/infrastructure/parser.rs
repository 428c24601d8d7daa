// docaudit-core/src/infrastructure/parser.rs

use serde_yaml::{Mapping, Value};

use crate::ports::{ParseError, StructuredTextParser};

/// Full YAML 1.2 parsing through `serde_yaml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParser;

impl StructuredTextParser for YamlParser {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn supports_nesting(&self) -> bool {
        true
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        serde_yaml::from_str(text).map_err(|e| ParseError(e.to_string()))
    }
}

/// Flat `key: value` reader for environments where full YAML is not wanted.
///
/// Every value is kept as a string with one layer of surrounding quotes removed. Blank lines,
/// `#` comments and lines without a colon are ignored. It never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineParser;

impl StructuredTextParser for LineParser {
    fn name(&self) -> &'static str {
        "minimal"
    }

    fn supports_nesting(&self) -> bool {
        false
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        let mut mapping = Mapping::new();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            mapping.insert(
                Value::String(key.trim().to_string()),
                Value::String(strip_quotes(value.trim()).to_string()),
            );
        }

        Ok(Value::Mapping(mapping))
    }
}

fn strip_quotes(value: &str) -> &str {
    let value = value.trim_matches('"');
    value.trim_matches('\'')
}

/// Parser implementation chosen at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserKind {
    #[default]
    Full,
    Minimal,
}

impl ParserKind {
    pub fn build(self) -> Box<dyn StructuredTextParser> {
        match self {
            ParserKind::Full => Box::new(YamlParser),
            ParserKind::Minimal => Box::new(LineParser),
        }
    }
}
