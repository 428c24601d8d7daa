// docaudit-core/src/domain/finding.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Which validator produced a finding. Drives strict-mode promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    FrontMatter,
    RequiredKey,
    Version,
    ReviewDate,
    Staleness,
    Link,
    Anchor,
    AiLog,
    Unreadable,
}

impl Check {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrontMatter => "front_matter",
            Self::RequiredKey => "required_key",
            Self::Version => "version",
            Self::ReviewDate => "review_date",
            Self::Staleness => "staleness",
            Self::Link => "link",
            Self::Anchor => "anchor",
            Self::AiLog => "ai_log",
            Self::Unreadable => "unreadable",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: String,
    pub check: Check,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    pub fn new(
        path: impl Into<String>,
        check: Check,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            check,
            message: message.into(),
            severity,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A document whose review date is older than its bucket allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleEntry {
    pub path: String,
    #[serde(serialize_with = "serialize_date")]
    pub last_reviewed: NaiveDate,
    pub age_days: i64,
    pub max_days: u32,
    // The persisted stale section keeps its four-field shape; the bucket lives in the message.
    #[serde(skip)]
    pub bucket: String,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_display() {
        let f = Finding::new(
            "docs/a.md",
            Check::RequiredKey,
            Severity::Warning,
            "missing front-matter key 'title'",
        );
        assert_eq!(f.to_string(), "docs/a.md: missing front-matter key 'title'");
        assert!(!f.is_error());
    }

    #[test]
    fn test_stale_entry_shape() -> anyhow::Result<()> {
        let entry = StaleEntry {
            path: "docs/a.md".into(),
            last_reviewed: NaiveDate::from_ymd_opt(2024, 1, 2)
                .ok_or_else(|| anyhow::anyhow!("date"))?,
            age_days: 400,
            max_days: 180,
            bucket: "default".into(),
        };
        let json = serde_json::to_value(&entry)?;
        assert_eq!(
            json,
            serde_json::json!({
                "path": "docs/a.md",
                "last_reviewed": "2024-01-02",
                "age_days": 400,
                "max_days": 180
            })
        );
        Ok(())
    }
}
