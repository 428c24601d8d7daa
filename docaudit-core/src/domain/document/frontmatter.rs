// docaudit-core/src/domain/document/frontmatter.rs

use regex::Regex;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::metadata::Metadata;
use crate::ports::StructuredTextParser;

fn re_front_matter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Leading whitespace before the opening marker is tolerated.
        Regex::new(r"(?s)\A\s*---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Result of splitting a document: declared metadata plus the remaining body.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    pub metadata: Metadata,
    pub body: &'a str,
    pub has_block: bool,
}

/// Splits `text` into front matter and body, parsing the block with `parser`.
///
/// Never fails: a missing block yields empty metadata and the whole text as body, an
/// unparsable block yields metadata carrying only the parse error.
pub fn extract<'a>(text: &'a str, parser: &dyn StructuredTextParser) -> Extracted<'a> {
    let Some(caps) = re_front_matter().captures(text) else {
        return Extracted {
            metadata: Metadata::default(),
            body: text,
            has_block: false,
        };
    };

    let block = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let body_start = caps.get(0).map(|m| m.end()).unwrap_or(0);

    let metadata = match parser.parse(block) {
        Ok(value) => into_metadata(value),
        Err(e) => Metadata::malformed(e.0),
    };

    Extracted {
        metadata,
        body: &text[body_start..],
        has_block: true,
    }
}

fn into_metadata(value: Value) -> Metadata {
    match value {
        Value::Null => Metadata::default(),
        Value::Mapping(mapping) => {
            let mut fields = BTreeMap::new();
            for (key, val) in mapping {
                let key = match key {
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    _ => return Metadata::malformed("front-matter keys must be scalars"),
                };
                fields.insert(key, val);
            }
            Metadata::from_fields(fields)
        }
        _ => Metadata::malformed("front-matter is not a key/value mapping"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ParseError;

    /// Parser double: YAML through serde_yaml directly.
    struct Yaml;

    impl StructuredTextParser for Yaml {
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

    #[test]
    fn test_no_block_keeps_full_text() {
        let text = "# Title\n\nSome text\n";
        let out = extract(text, &Yaml);
        assert!(out.metadata.is_empty());
        assert!(!out.has_block);
        assert_eq!(out.body, text);
    }

    #[test]
    fn test_block_after_blank_lines() {
        let text = "\n\n---\ntitle: Guide\nversion: 1.2\n---\n# Guide\nbody\n";
        let out = extract(text, &Yaml);
        assert!(out.has_block);
        assert_eq!(out.metadata.get_str("title").as_deref(), Some("Guide"));
        assert_eq!(out.metadata.get_str("version").as_deref(), Some("1.2"));
        assert_eq!(out.body, "# Guide\nbody\n");
    }

    #[test]
    fn test_block_at_end_of_file() {
        let out = extract("---\ntitle: Only\n---", &Yaml);
        assert_eq!(out.metadata.get_str("title").as_deref(), Some("Only"));
        assert_eq!(out.body, "");
    }

    #[test]
    fn test_malformed_block_is_data_not_error() {
        let text = "---\ntitle: [unclosed\n---\nbody\n";
        let out = extract(text, &Yaml);
        assert!(out.metadata.parse_error().is_some());
        assert!(!out.metadata.is_empty());
        assert_eq!(out.body, "body\n");
    }

    #[test]
    fn test_non_mapping_block_is_malformed() {
        let out = extract("---\n- a\n- b\n---\n", &Yaml);
        assert_eq!(
            out.metadata.parse_error(),
            Some("front-matter is not a key/value mapping")
        );
    }

    #[test]
    fn test_empty_block_is_empty_metadata() {
        let out = extract("---\n---\nbody\n", &Yaml);
        assert!(out.has_block);
        assert!(out.metadata.is_empty());
        assert_eq!(out.body, "body\n");
    }
}
