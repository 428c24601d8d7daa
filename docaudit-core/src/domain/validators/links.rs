// docaudit-core/src/domain/validators/links.rs

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use super::ValidationContext;
use crate::domain::document::{Document, extract_headings};
use crate::domain::finding::{Check, Finding};

fn re_scheme() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// `https://…`, `mailto:…` and other scheme-qualified targets are never resolved locally.
pub fn is_external(target: &str) -> bool {
    target.contains("://") || re_scheme().is_match(target)
}

/// Strips an optional `<…>` wrapper and a trailing `"title"`.
fn clean_target(raw: &str) -> &str {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix('<')
        .and_then(|r| r.split_once('>').map(|(inner, _)| inner))
        .unwrap_or(raw);
    raw.split_whitespace().next().unwrap_or(raw)
}

fn resolve(doc: &Document, ctx: &ValidationContext<'_>, target: &str) -> PathBuf {
    let target = target.replace("%20", " ");
    match target.strip_prefix('/') {
        Some(rooted) => ctx.root.join(rooted),
        None => doc.directory().join(target),
    }
}

/// Every relative link target must exist on disk.
pub fn check_links(doc: &Document, ctx: &ValidationContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for link in &doc.links {
        let target = clean_target(link);
        if is_external(target) || target.starts_with('#') {
            continue;
        }
        let file_part = target.split('#').next().unwrap_or_default();
        if file_part.is_empty() {
            continue;
        }

        let resolved = resolve(doc, ctx, file_part);
        if !resolved.exists() {
            debug!(document = %doc.display_path, target = %resolved.display(), "unresolved link");
            findings.push(ctx.finding(doc, Check::Link, format!("broken link -> {}", link)));
        }
    }

    findings
}

/// GitHub-style heading slug: lowercase, punctuation dropped, spaces to dashes.
pub fn slugify(heading: &str) -> String {
    heading
        .trim_start_matches('#')
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// Slugs of a heading list, with `-1`, `-2`… suffixes for repeated headings.
pub fn anchor_set(headings: &[String]) -> HashSet<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut anchors = HashSet::new();
    for heading in headings {
        let slug = slugify(heading);
        let count = seen.entry(slug.clone()).or_insert(0);
        if *count == 0 {
            anchors.insert(slug);
        } else {
            anchors.insert(format!("{}-{}", slug, count));
        }
        *count += 1;
    }
    anchors
}

fn headings_of(path: &Path) -> Option<Vec<String>> {
    let bytes = std::fs::read(path).ok()?;
    Some(extract_headings(&String::from_utf8_lossy(&bytes)))
}

/// Best effort: fragments must name a heading of the targeted Markdown file.
/// Always advisory; unreadable or missing targets are left to the link check.
pub fn check_anchors(doc: &Document, ctx: &ValidationContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    let own_anchors = anchor_set(&doc.headings);

    for link in &doc.links {
        let target = clean_target(link);
        if is_external(target) {
            continue;
        }
        let Some((file_part, fragment)) = target.split_once('#') else {
            continue;
        };
        if fragment.is_empty() {
            continue;
        }

        let known = if file_part.is_empty() {
            own_anchors.contains(&fragment.to_lowercase())
        } else {
            let resolved = resolve(doc, ctx, file_part);
            let is_markdown = resolved
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
            if !is_markdown || !resolved.is_file() {
                continue;
            }
            match headings_of(&resolved) {
                Some(headings) => anchor_set(&headings).contains(&fragment.to_lowercase()),
                None => continue,
            }
        };

        if !known {
            findings.push(ctx.finding(doc, Check::Anchor, format!("broken anchor -> {}", link)));
        }
    }

    findings
}
