// docaudit-core/src/domain/activity/mod.rs
//
// Activity-log entries as written by the AI session logger (one JSON object per line).

pub mod summary;

pub use summary::{ActivitySummary, summarize};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Route {
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subtype: Option<String>,
}

/// One logged AI session.
///
/// Every field is optional and read leniently: a field of an unexpected shape reads as
/// absent and never costs the entry its `outputs` or `prompt_file`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ActivityEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub agent: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub route: Option<Route>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub goal: Option<String>,
    #[serde(default, deserialize_with = "lenient_paths")]
    pub context_files: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prompt_file: Option<String>,
    #[serde(default, deserialize_with = "lenient_paths")]
    pub outputs: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub decisions: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reviewed_by: Option<String>,
    /// Truthiness of whatever the router wrote (`true`, `1`, `"yes"`...).
    #[serde(default, deserialize_with = "lenient_truthy")]
    pub fallback: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub elapsed_sec: Option<f64>,
}

// --- LECTURE TOLÉRANTE ---

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// A list keeps its scalar items as text; a bare string is a single path.
fn lenient_paths<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().filter_map(text_of).collect()),
        Value::String(s) => Some(vec![s]),
        _ => None,
    })
}

fn lenient_truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(map) => Some(!map.is_empty()),
    })
}

impl ActivityEntry {
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn outputs(&self) -> &[String] {
        self.outputs.as_deref().unwrap_or_default()
    }

    /// Reviewed when a reviewer is named (the writer uses `TBD` as placeholder).
    pub fn is_reviewed(&self) -> bool {
        self.reviewed_by
            .as_deref()
            .map(str::trim)
            .is_some_and(|r| !r.is_empty() && r != "TBD")
    }
}

/// All entries loaded for the run, read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(entries: Vec<ActivityEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when some entry lists the document among its outputs or used it as prompt file.
    ///
    /// Outputs are matched against the root-relative path, the absolute path, or as a path
    /// suffix of the absolute path.
    pub fn references(&self, relative: &str, absolute: &str) -> bool {
        let matches = |candidate: &str| {
            let candidate = candidate.trim().trim_start_matches("./");
            !candidate.is_empty()
                && (candidate == relative
                    || candidate == absolute
                    || absolute.ends_with(&format!("/{}", candidate.trim_start_matches('/'))))
        };

        self.entries.iter().any(|entry| {
            entry.outputs().iter().any(|out| matches(out))
                || entry.prompt_file.as_deref().is_some_and(|p| matches(p))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(lines: &[&str]) -> ActivityLog {
        ActivityLog::new(
            lines
                .iter()
                .filter_map(|l| ActivityEntry::parse_line(l).ok())
                .collect(),
        )
    }

    #[test]
    fn test_lenient_entry_shape() -> anyhow::Result<()> {
        let entry = ActivityEntry::parse_line(r#"{"outputs": ["docs/a.md"], "extra": 1}"#)?;
        assert_eq!(entry.outputs(), ["docs/a.md".to_string()]);
        assert!(entry.prompt_file.is_none());
        assert!(ActivityEntry::parse_line("not json").is_err());
        Ok(())
    }

    #[test]
    fn test_mistyped_side_fields_keep_the_entry() -> anyhow::Result<()> {
        let line = r#"{"outputs":["docs/ai/gen.md"],"prompt_file":"","elapsed_sec":"1.5s","fallback":"no"}"#;
        let entry = ActivityEntry::parse_line(line)?;
        assert_eq!(entry.outputs(), ["docs/ai/gen.md".to_string()]);
        assert_eq!(entry.elapsed_sec, None);
        assert_eq!(entry.fallback, Some(true));

        let odd = ActivityEntry::parse_line(
            r#"{"route": "plan", "outputs": ["a.md", 7, null], "reviewed_by": 42, "decisions": "x"}"#,
        )?;
        assert_eq!(odd.route, None);
        assert_eq!(odd.outputs(), ["a.md".to_string(), "7".to_string()]);
        assert_eq!(odd.reviewed_by.as_deref(), Some("42"));
        assert_eq!(odd.decisions, None);

        let activity = log(&[line]);
        assert!(activity.references("docs/ai/gen.md", "/repo/docs/ai/gen.md"));
        Ok(())
    }

    #[test]
    fn test_reviewed_placeholder() -> anyhow::Result<()> {
        assert!(ActivityEntry::parse_line(r#"{"reviewed_by": "Ana"}"#)?.is_reviewed());
        assert!(!ActivityEntry::parse_line(r#"{"reviewed_by": "TBD"}"#)?.is_reviewed());
        assert!(!ActivityEntry::parse_line(r#"{"reviewed_by": ""}"#)?.is_reviewed());
        assert!(!ActivityEntry::parse_line("{}")?.is_reviewed());
        Ok(())
    }

    #[test]
    fn test_references_by_output_or_prompt_file() {
        let activity = log(&[
            r#"{"outputs": ["docs/ai/generated.md"], "prompt_file": ""}"#,
            r#"{"outputs": [], "prompt_file": "docs/prompts/p.md"}"#,
        ]);
        assert!(activity.references("docs/ai/generated.md", "/repo/docs/ai/generated.md"));
        assert!(activity.references("docs/prompts/p.md", "/repo/docs/prompts/p.md"));
        assert!(!activity.references("docs/other.md", "/repo/docs/other.md"));
        // Empty prompt_file never matches.
        assert!(!activity.references("", "/repo"));
    }

    #[test]
    fn test_references_by_suffix() {
        let activity = log(&[r#"{"outputs": ["./ai/generated.md"]}"#]);
        assert!(activity.references("docs/ai/generated.md", "/repo/docs/ai/generated.md"));
        assert!(!activity.references("docs/xai/generated.md", "/repo/docs/xai/generated.md"));
    }
}
