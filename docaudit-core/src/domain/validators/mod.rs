// docaudit-core/src/domain/validators/mod.rs
//
// Each validator is a pure function of (document, policy, run flags, activity log) and
// returns findings; none of them can stop the others from running on the same document.

pub mod ai_log;
pub mod front_matter;
pub mod links;
pub mod review_date;
pub mod version;

use chrono::NaiveDate;
use std::path::Path;

use crate::domain::activity::ActivityLog;
use crate::domain::document::Document;
use crate::domain::finding::{Check, Finding, Severity, StaleEntry};
use crate::domain::policy::PolicyResolver;

/// Switches given on the command line for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub strict: bool,
    pub fail_on_stale: bool,
    pub check_links: bool,
    pub check_anchors: bool,
    pub check_ai_logs: bool,
}

/// Run-scoped, read-only inputs shared by every validator.
pub struct ValidationContext<'a> {
    pub resolver: &'a PolicyResolver,
    pub flags: RunFlags,
    pub activity: &'a ActivityLog,
    pub today: NaiveDate,
    /// Audit root; links starting with `/` resolve against it.
    pub root: &'a Path,
}

impl ValidationContext<'_> {
    /// Severity of a finding produced by `check`, given `--strict`, `--fail-on-stale` and the
    /// policy's promotion table.
    pub fn severity_for(&self, check: Check) -> Severity {
        let promote = self.resolver.strict_promotion();
        let promotable = match check {
            Check::FrontMatter | Check::RequiredKey => promote.front_matter,
            Check::ReviewDate => promote.review_date,
            Check::Link => promote.links,
            Check::AiLog => promote.ai_logs,
            Check::Staleness => {
                if self.flags.fail_on_stale {
                    return Severity::Error;
                }
                promote.staleness
            }
            Check::Version | Check::Anchor | Check::Unreadable => false,
        };

        if promotable && self.flags.strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    pub fn finding(&self, doc: &Document, check: Check, message: impl Into<String>) -> Finding {
        Finding::new(&doc.display_path, check, self.severity_for(check), message)
    }
}

/// Everything the validator set says about one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentVerdict {
    pub findings: Vec<Finding>,
    pub stale: Option<StaleEntry>,
}

/// Runs the whole battery on `doc`. Opt-in checks only run when their flag is set.
pub fn validate_document(doc: &Document, ctx: &ValidationContext<'_>) -> DocumentVerdict {
    let mut verdict = DocumentVerdict::default();

    let metadata_present = front_matter::check(doc, ctx, &mut verdict.findings);

    if metadata_present {
        verdict.findings.extend(version::check(doc, ctx));

        let review = review_date::check(doc, ctx);
        verdict.findings.extend(review.findings);
        verdict.stale = review.stale;

        if ctx.flags.check_ai_logs {
            verdict.findings.extend(ai_log::check(doc, ctx));
        }
    }

    if ctx.flags.check_links {
        verdict.findings.extend(links::check_links(doc, ctx));
    }
    if ctx.flags.check_anchors {
        verdict.findings.extend(links::check_anchors(doc, ctx));
    }

    verdict
}


#[cfg(test)]
mod tests {
    use super::fixtures::{Harness, doc};
    use super::*;

    #[test]
    fn test_severity_table() {
        let h = Harness::new();
        let plain = h.ctx(RunFlags::default());
        let strict = h.ctx(RunFlags {
            strict: true,
            ..RunFlags::default()
        });
        let stale_fail = h.ctx(RunFlags {
            fail_on_stale: true,
            ..RunFlags::default()
        });

        assert_eq!(plain.severity_for(Check::RequiredKey), Severity::Warning);
        assert_eq!(strict.severity_for(Check::RequiredKey), Severity::Error);
        assert_eq!(strict.severity_for(Check::Version), Severity::Warning);
        assert_eq!(strict.severity_for(Check::Anchor), Severity::Warning);
        assert_eq!(strict.severity_for(Check::Staleness), Severity::Warning);
        assert_eq!(stale_fail.severity_for(Check::Staleness), Severity::Error);
    }

    #[test]
    fn test_strict_moves_findings_without_changing_count() {
        let h = Harness::new();
        let d = doc("---\ntitle: T\nversion: v1\n---\n# T\n");

        let plain = validate_document(&d, &h.ctx(RunFlags::default()));
        let strict = validate_document(
            &d,
            &h.ctx(RunFlags {
                strict: true,
                ..RunFlags::default()
            }),
        );

        let errors = |v: &DocumentVerdict| v.findings.iter().filter(|f| f.is_error()).count();
        assert_eq!(plain.findings.len(), strict.findings.len());
        assert!(errors(&strict) >= errors(&plain));
        assert_eq!(errors(&plain), 0);
        // context + last_reviewed missing, version shape stays a warning
        assert_eq!(errors(&strict), 2);
    }

    #[test]
    fn test_missing_front_matter_is_single_finding() {
        let h = Harness::new();
        let d = doc("# Just a title\n");
        let verdict = validate_document(&d, &h.ctx(RunFlags::default()));
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.findings[0].check, Check::FrontMatter);
        assert!(verdict.findings[0].message.contains("missing YAML front-matter"));
        assert!(verdict.stale.is_none());
    }
}
