// docaudit-core/src/domain/validators/front_matter.rs

use super::ValidationContext;
use crate::domain::document::Document;
use crate::domain::finding::{Check, Finding};

/// Front-matter presence, parse errors and required keys.
///
/// Returns `false` when the document declares no metadata at all, in which case the other
/// metadata checks have nothing to look at.
pub fn check(doc: &Document, ctx: &ValidationContext<'_>, findings: &mut Vec<Finding>) -> bool {
    let required = ctx.resolver.required_keys();

    if doc.metadata.is_empty() {
        findings.push(ctx.finding(
            doc,
            Check::FrontMatter,
            format!(
                "missing YAML front-matter (required keys: {})",
                required.join(", ")
            ),
        ));
        return false;
    }

    if let Some(reason) = doc.metadata.parse_error() {
        findings.push(ctx.finding(doc, Check::FrontMatter, format!("YAML error: {}", reason)));
    }

    for key in required {
        if !doc.metadata.contains(key) {
            findings.push(ctx.finding(
                doc,
                Check::RequiredKey,
                format!("missing front-matter key '{}'", key),
            ));
        }
    }

    true
}
