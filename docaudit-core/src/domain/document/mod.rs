// docaudit-core/src/domain/document/mod.rs

pub mod frontmatter;
pub mod metadata;

pub use frontmatter::{Extracted, extract};
pub use metadata::Metadata;

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::ports::StructuredTextParser;

fn re_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[[^\]]+\]\(([^)]+)\)")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// One scanned Markdown file. Built once per discovery pass and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    /// Absolute location on disk.
    pub path: PathBuf,
    /// Posix path relative to the audit root (absolute when the file lies outside it).
    pub display_path: String,
    pub metadata: Metadata,
    pub has_front_matter: bool,
    pub body: String,
    pub headings: Vec<String>,
    pub links: Vec<String>,
}

impl Document {
    pub fn parse(
        path: PathBuf,
        display_path: String,
        text: &str,
        parser: &dyn StructuredTextParser,
    ) -> Self {
        let extracted = extract(text, parser);
        let headings = extract_headings(extracted.body);
        let links = extract_links(extracted.body);

        Self {
            path,
            display_path,
            metadata: extracted.metadata,
            has_front_matter: extracted.has_block,
            body: extracted.body.to_string(),
            headings,
            links,
        }
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Lines whose first non-blank character is `#`, trimmed but otherwise verbatim.
pub fn extract_headings(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| line.trim_start().starts_with('#'))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Targets of `[text](target)` links, in document order, duplicates kept.
pub fn extract_links(body: &str) -> Vec<String> {
    re_link()
        .captures_iter(body)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Converts a path to forward-slash form regardless of platform.
pub fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_keep_marker() {
        let body = "# Top\ntext\n  ## Indented\nnot # a heading\n";
        assert_eq!(extract_headings(body), vec!["# Top", "## Indented"]);
    }

    #[test]
    fn test_links_in_order_with_duplicates() {
        let body = "See [a](a.md) and [b](https://x.io) then [a again](a.md#part).\n[](empty.md)";
        assert_eq!(
            extract_links(body),
            vec!["a.md", "https://x.io", "a.md#part"]
        );
    }

    #[test]
    fn test_to_posix_absolute_and_relative() {
        assert_eq!(to_posix(Path::new("docs/a/b.md")), "docs/a/b.md");
        assert_eq!(to_posix(Path::new("/repo/docs/b.md")), "/repo/docs/b.md");
    }
}
