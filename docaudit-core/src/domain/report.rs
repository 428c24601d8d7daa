// docaudit-core/src/domain/report.rs

use serde::Serialize;
use std::fmt;

use crate::domain::finding::{Finding, Severity, StaleEntry};
use crate::domain::validators::DocumentVerdict;

// Declaration order gives Ok < Warn < Error, so the run status is a plain `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Ok,
    Warn,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Status contributed by a single document.
    pub fn of(verdict: &DocumentVerdict) -> Self {
        let worst = verdict.findings.iter().map(|f| f.severity).max();
        match worst {
            Some(Severity::Error) => Self::Error,
            Some(Severity::Warning) => Self::Warn,
            None if verdict.stale.is_some() => Self::Warn,
            None => Self::Ok,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ReportSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub stale: usize,
}

/// Persisted audit report. Field order is part of the external format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub status: Status,
    pub summary: ReportSummary,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stale: Vec<StaleEntry>,
}

impl AuditReport {
    pub fn has_errors(&self) -> bool {
        self.status == Status::Error
    }

    /// One-line console summary.
    pub fn summary_line(&self) -> String {
        format!(
            "[docaudit] status={} files={} errors={} warnings={} stale={}",
            self.status,
            self.summary.files,
            self.summary.errors,
            self.summary.warnings,
            self.summary.stale
        )
    }
}

/// Folds per-document verdicts, in discovery order, into the run report.
#[derive(Debug, Default)]
pub struct SeverityAggregator {
    files: usize,
    status: Status,
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    stale: Vec<StaleEntry>,
}

impl SeverityAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: DocumentVerdict) {
        self.files += 1;
        self.status = self.status.max(Status::of(&verdict));

        for finding in verdict.findings {
            match finding.severity {
                Severity::Error => self.errors.push(finding),
                Severity::Warning => self.warnings.push(finding),
            }
        }
        if let Some(entry) = verdict.stale {
            self.stale.push(entry);
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn finish(self) -> AuditReport {
        AuditReport {
            status: self.status,
            summary: ReportSummary {
                files: self.files,
                errors: self.errors.len(),
                warnings: self.warnings.len(),
                stale: self.stale.len(),
            },
            errors: self.errors.iter().map(ToString::to_string).collect(),
            warnings: self.warnings.iter().map(ToString::to_string).collect(),
            stale: self.stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::finding::Check;
    use chrono::NaiveDate;

    fn finding(path: &str, severity: Severity) -> Finding {
        Finding::new(path, Check::RequiredKey, severity, "missing front-matter key 'title'")
    }

    fn stale(path: &str) -> StaleEntry {
        StaleEntry {
            path: path.into(),
            last_reviewed: NaiveDate::default(),
            age_days: 400,
            max_days: 180,
            bucket: "default".into(),
        }
    }

    #[test]
    fn test_status_ordering() {
        assert!(Status::Ok < Status::Warn);
        assert!(Status::Warn < Status::Error);
    }

    #[test]
    fn test_empty_run_is_ok() {
        let report = SeverityAggregator::new().finish();
        assert_eq!(report.status, Status::Ok);
        assert_eq!(report.summary, ReportSummary::default());
    }

    #[test]
    fn test_stale_alone_is_warn() {
        let mut agg = SeverityAggregator::new();
        agg.record(DocumentVerdict {
            findings: vec![],
            stale: Some(stale("docs/a.md")),
        });
        assert_eq!(agg.finish().status, Status::Warn);
    }

    #[test]
    fn test_status_is_order_independent() {
        let verdicts = vec![
            DocumentVerdict {
                findings: vec![finding("docs/a.md", Severity::Warning)],
                stale: None,
            },
            DocumentVerdict {
                findings: vec![finding("docs/b.md", Severity::Error)],
                stale: None,
            },
            DocumentVerdict::default(),
        ];

        let forward = verdicts.iter().cloned().fold(SeverityAggregator::new(), |mut a, v| {
            a.record(v);
            a
        });
        let backward = verdicts.iter().rev().cloned().fold(SeverityAggregator::new(), |mut a, v| {
            a.record(v);
            a
        });
        assert_eq!(forward.status(), Status::Error);
        assert_eq!(forward.status(), backward.status());

        let report = forward.finish();
        assert!(report.has_errors());
        assert_eq!(report.summary.files, 3);
        assert_eq!(report.errors, vec!["docs/b.md: missing front-matter key 'title'"]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_report_json_shape() -> anyhow::Result<()> {
        let mut agg = SeverityAggregator::new();
        agg.record(DocumentVerdict {
            findings: vec![finding("docs/a.md", Severity::Warning)],
            stale: None,
        });
        let json = serde_json::to_value(agg.finish())?;
        assert_eq!(
            json,
            serde_json::json!({
                "status": "warn",
                "summary": {"files": 1, "errors": 0, "warnings": 1, "stale": 0},
                "errors": [],
                "warnings": ["docs/a.md: missing front-matter key 'title'"],
                "stale": []
            })
        );
        Ok(())
    }

    #[test]
    fn test_summary_line() {
        let mut agg = SeverityAggregator::new();
        agg.record(DocumentVerdict {
            findings: vec![finding("docs/a.md", Severity::Error)],
            stale: Some(stale("docs/a.md")),
        });
        insta::assert_snapshot!(
            agg.finish().summary_line(),
            @"[docaudit] status=error files=1 errors=1 warnings=0 stale=1"
        );
    }
}
