// docaudit-core/src/domain/document/metadata.rs

use serde_yaml::Value;
use std::collections::BTreeMap;

/// Front-matter keys with a meaning to the auditor.
pub const KEY_TITLE: &str = "title";
pub const KEY_VERSION: &str = "version";
pub const KEY_CONTEXT: &str = "context";
pub const KEY_LAST_REVIEWED: &str = "last_reviewed";
pub const KEY_AI_GENERATED: &str = "ai_generated";
pub const KEY_AI_CONTEXT: &str = "ai_context";

/// Declared governance metadata of a document.
///
/// Three states are valid and none of them is an extraction failure:
/// - empty: the document has no front-matter block (or the block is blank),
/// - malformed: the block exists but could not be parsed (`parse_error` is set, no fields),
/// - populated: a mapping of keys to scalar values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    fields: BTreeMap<String, Value>,
    parse_error: Option<String>,
}

impl Metadata {
    pub fn from_fields(fields: BTreeMap<String, Value>) -> Self {
        Self {
            fields,
            parse_error: None,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            parse_error: Some(reason.into()),
        }
    }

    /// No block at all, or a block that declared nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.parse_error.is_none()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Scalar rendered as text. `null` counts as absent.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_to_string)
    }

    /// YAML booleans, or the usual spellings when the minimal parser produced strings.
    pub fn flag(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "on" | "1")
            }
            Some(Value::Number(n)) => n.as_i64().is_some_and(|v| v != 0),
            _ => false,
        }
    }

    /// Any declared, non-empty value: `ai_context: high` counts, `ai_context: ""` does not.
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.fields.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Sequence(items)) => !items.is_empty(),
            Some(Value::Mapping(map)) => !map.is_empty(),
            Some(Value::Tagged(tagged)) => !tagged.value.is_null(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}
