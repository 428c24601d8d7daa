// docaudit-core/src/domain/validators/version.rs

use regex::Regex;
use std::sync::OnceLock;

use super::ValidationContext;
use crate::domain::document::Document;
use crate::domain::document::metadata::KEY_VERSION;
use crate::domain::finding::{Check, Finding};

fn re_semverish() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+\.\d+(\.\d+)?$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// `MAJOR.MINOR` or `MAJOR.MINOR.PATCH`, digits only.
pub fn is_semverish(version: &str) -> bool {
    re_semverish().is_match(version.trim())
}

/// Advisory only: a mismatch is always a warning.
pub fn check(doc: &Document, ctx: &ValidationContext<'_>) -> Option<Finding> {
    let version = doc.metadata.get_str(KEY_VERSION)?;
    if is_semverish(&version) {
        return None;
    }
    Some(ctx.finding(
        doc,
        Check::Version,
        format!("version not SemVer-ish '{}'", version),
    ))
}

#[cfg(test)]
mod tests {
    use super::super::RunFlags;
    use super::super::fixtures::{Harness, doc};
    use super::*;
    use crate::domain::finding::Severity;

    #[test]
    fn test_semverish_shapes() {
        for ok in ["1.0", "0.1", "10.20.30", " 2.3 "] {
            assert!(is_semverish(ok), "{ok} should pass");
        }
        for bad in ["1", "v1.0", "1.0.0-rc1", "1.0.0.0", "a.b", ""] {
            assert!(!is_semverish(bad), "{bad} should fail");
        }
    }

    #[test]
    fn test_bad_version_is_one_warning_even_strict() {
        let h = Harness::new();
        let ctx = h.ctx(RunFlags {
            strict: true,
            ..RunFlags::default()
        });
        let finding = check(&doc("---\nversion: draft\n---\n"), &ctx);
        let finding = finding.map(|f| (f.severity, f.message));
        assert_eq!(
            finding,
            Some((Severity::Warning, "version not SemVer-ish 'draft'".to_string()))
        );
    }

    #[test]
    fn test_absent_or_valid_version_is_silent() {
        let h = Harness::new();
        let ctx = h.ctx(RunFlags::default());
        assert!(check(&doc("---\ntitle: x\n---\n"), &ctx).is_none());
        assert!(check(&doc("---\nversion: 1.2.3\n---\n"), &ctx).is_none());
        assert!(check(&doc("---\nversion: 1.0\n---\n"), &ctx).is_none());
    }
}
