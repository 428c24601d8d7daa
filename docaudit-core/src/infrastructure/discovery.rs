// docaudit-core/src/infrastructure/discovery.rs

use chrono::{DateTime, Local, NaiveDate};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use crate::domain::document::to_posix;
use crate::domain::error::DomainError;
use crate::domain::policy::right_anchored;

const SKIPPED_DIRS: [&str; 3] = [".venv", "node_modules", ".git"];

/// `--only` restriction.
#[derive(Debug, Clone)]
pub struct OnlyFilter {
    raw: String,
    globs: GlobSet,
}

impl OnlyFilter {
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        let invalid = |e: globset::Error| {
            DomainError::InvalidOnlyPattern(pattern.to_string(), e.to_string())
        };
        let mut builder = GlobSetBuilder::new();
        for variant in right_anchored(pattern) {
            builder.add(Glob::new(&variant).map_err(invalid)?);
        }
        Ok(Self {
            raw: pattern.to_string(),
            globs: builder.build().map_err(invalid)?,
        })
    }

    /// An absolute path to an existing Markdown file, scanned even outside the docs tree.
    pub fn direct_file(&self) -> Option<PathBuf> {
        let path = PathBuf::from(&self.raw);
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if !(path.is_absolute() && is_markdown && path.is_file()) {
            return None;
        }
        Some(fs::canonicalize(&path).unwrap_or(path))
    }

    pub fn matches(&self, absolute: &str, relative: &str) -> bool {
        absolute == self.raw
            || absolute.ends_with(&format!("/{}", self.raw))
            || self.globs.is_match(absolute)
            || self.globs.is_match(relative)
    }
}

/// Which documents one run looks at.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    pub only: Option<OnlyFilter>,
    /// Keep documents modified on or after this local date.
    pub since: Option<NaiveDate>,
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn modified_on(path: &Path) -> Option<NaiveDate> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).date_naive())
}

/// Root-relative posix path, or the absolute path when `path` lies outside `root`.
pub fn display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => to_posix(relative),
        Err(_) => to_posix(path),
    }
}

/// Lists the Markdown files under `docs_dir`, sorted so that runs are reproducible.
#[instrument(skip(options))]
pub fn discover_documents(
    root: &Path,
    docs_dir: &Path,
    options: &DiscoveryOptions,
) -> Vec<PathBuf> {
    if let Some(direct) = options.only.as_ref().and_then(OnlyFilter::direct_file) {
        debug!(path = %direct.display(), "Scanning single file given by --only");
        return vec![direct];
    }

    if !docs_dir.is_dir() {
        debug!(path = %docs_dir.display(), "Docs directory missing, nothing to scan");
        return Vec::new();
    }

    let walker = WalkDir::new(docs_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped(e));

    let mut found: Vec<(String, PathBuf)> = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        let absolute = to_posix(path);
        if let Some(only) = &options.only
            && !only.matches(&absolute, &display_path(root, path))
        {
            continue;
        }
        if let Some(since) = options.since
            && modified_on(path).is_some_and(|day| day < since)
        {
            continue;
        }

        found.push((absolute, path.to_path_buf()));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(count = found.len(), "Documents discovered");
    found.into_iter().map(|(_, path)| path).collect()
}
