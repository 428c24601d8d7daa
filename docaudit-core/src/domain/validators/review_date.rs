// docaudit-core/src/domain/validators/review_date.rs

use chrono::{NaiveDate, NaiveDateTime};

use super::ValidationContext;
use crate::domain::document::Document;
use crate::domain::document::metadata::KEY_LAST_REVIEWED;
use crate::domain::finding::{Check, Finding, StaleEntry};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDThh:mm:ssZ` and `YYYY/MM/DD`.
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

#[derive(Debug, Default)]
pub struct ReviewOutcome {
    pub findings: Vec<Finding>,
    pub stale: Option<StaleEntry>,
}

pub fn check(doc: &Document, ctx: &ValidationContext<'_>) -> ReviewOutcome {
    let mut outcome = ReviewOutcome::default();

    let Some(raw) = doc.metadata.get_str(KEY_LAST_REVIEWED) else {
        // An absent required key was already reported once; a declared but empty one was not.
        let required = ctx
            .resolver
            .required_keys()
            .iter()
            .any(|k| k == KEY_LAST_REVIEWED);
        if !required || doc.metadata.contains(KEY_LAST_REVIEWED) {
            outcome
                .findings
                .push(ctx.finding(doc, Check::ReviewDate, "missing last_reviewed"));
        }
        return outcome;
    };

    let Some(reviewed) = parse_review_date(&raw) else {
        outcome.findings.push(ctx.finding(
            doc,
            Check::ReviewDate,
            format!("invalid last_reviewed '{}'", raw),
        ));
        return outcome;
    };

    let bucket = ctx.resolver.bucket_for(&doc.display_path);
    let max_days = ctx.resolver.max_days_for(bucket);
    let age_days = (ctx.today - reviewed).num_days();

    if age_days > i64::from(max_days) {
        outcome.findings.push(ctx.finding(
            doc,
            Check::Staleness,
            format!(
                "stale by {} days (bucket={})",
                age_days - i64::from(max_days),
                bucket
            ),
        ));
        outcome.stale = Some(StaleEntry {
            path: doc.display_path.clone(),
            last_reviewed: reviewed,
            age_days,
            max_days,
            bucket: bucket.to_string(),
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::super::RunFlags;
    use super::super::fixtures::{Harness, doc, today};
    use super::*;
    use crate::domain::finding::Severity;

    fn with_date(date: &str) -> Document {
        doc(&format!(
            "---\ntitle: T\nversion: 1.0\ncontext: c\nlast_reviewed: {}\n---\n",
            date
        ))
    }

    #[test]
    fn test_accepted_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_review_date("2024-03-09"), expected);
        assert_eq!(parse_review_date("2024/03/09"), expected);
        assert_eq!(parse_review_date("2024-03-09T10:11:12Z"), expected);
        assert_eq!(parse_review_date("09/03/2024"), None);
        assert_eq!(parse_review_date("2024-13-01"), None);
    }

    #[test]
    fn test_reviewed_today_is_never_stale() {
        let h = Harness::new();
        let date = today().format("%Y-%m-%d").to_string();
        let out = check(&with_date(&date), &h.ctx(RunFlags::default()));
        assert!(out.findings.is_empty());
        assert!(out.stale.is_none());
    }

    #[test]
    fn test_stale_is_warning_unless_fail_on_stale() {
        let h = Harness::new();
        // 2025-06-01 minus 2024-01-01 = 517 days, threshold 180
        let d = with_date("2024-01-01");

        let strict = check(
            &d,
            &h.ctx(RunFlags {
                strict: true,
                ..RunFlags::default()
            }),
        );
        let stale = strict.stale.as_ref().map(|s| (s.age_days, s.max_days));
        assert_eq!(stale, Some((517, 180)));
        assert_eq!(strict.findings.len(), 1);
        assert_eq!(strict.findings[0].severity, Severity::Warning);
        assert_eq!(
            strict.findings[0].message,
            "stale by 337 days (bucket=default)"
        );

        let failing = check(
            &d,
            &h.ctx(RunFlags {
                fail_on_stale: true,
                ..RunFlags::default()
            }),
        );
        assert_eq!(failing.findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_invalid_date_promoted_under_strict() {
        let h = Harness::new();
        let out = check(
            &with_date("last tuesday"),
            &h.ctx(RunFlags {
                strict: true,
                ..RunFlags::default()
            }),
        );
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].severity, Severity::Error);
        assert_eq!(out.findings[0].message, "invalid last_reviewed 'last tuesday'");
    }

    #[test]
    fn test_absent_date_reported_here_only_when_not_required() -> anyhow::Result<()> {
        use crate::domain::policy::{DefaultPolicy, PolicyConfig, PolicyResolver};

        let mut h = Harness::new();
        let d = doc("---\ntitle: T\n---\n");
        assert!(check(&d, &h.ctx(RunFlags::default())).findings.is_empty());

        let config: PolicyConfig = serde_yaml::from_str("required_keys: [title]\n")?;
        h.resolver = PolicyResolver::new(Some(config), DefaultPolicy::v1())?;
        let out = check(&d, &h.ctx(RunFlags::default()));
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].message, "missing last_reviewed");
        Ok(())
    }

    #[test]
    fn test_declared_but_empty_date_is_reported() {
        let h = Harness::new();
        let out = check(&with_date(""), &h.ctx(RunFlags::default()));
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].message, "missing last_reviewed");
    }
}
