// docaudit-core/src/domain/index.rs

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::document::Document;
use crate::domain::document::metadata::{KEY_AI_CONTEXT, KEY_LAST_REVIEWED, KEY_TITLE, KEY_VERSION};

pub const MAX_HEADINGS: usize = 50;
pub const MAX_LINKS: usize = 100;

/// Lightweight descriptor of one scanned document, consumed by downstream tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextIndexEntry {
    pub path: String,
    pub title: Option<String>,
    pub version: Option<String>,
    pub last_reviewed: Option<String>,
    pub ai_context: bool,
    pub headings: Vec<String>,
    pub links: Vec<String>,
    pub summary_hash: String,
}

/// First 16 hex chars of SHA-256 over `title + "\n" + headings`. Changes only when the
/// title or the heading outline changes.
pub fn summary_hash(title: &str, headings: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(b"\n");
    hasher.update(headings.join("\n").as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(16);
    digest
}

impl ContextIndexEntry {
    pub fn from_document(doc: &Document) -> Self {
        let title = doc.metadata.get_str(KEY_TITLE);
        let summary_hash = summary_hash(title.as_deref().unwrap_or_default(), &doc.headings);

        Self {
            path: doc.display_path.clone(),
            version: doc.metadata.get_str(KEY_VERSION),
            last_reviewed: doc.metadata.get_str(KEY_LAST_REVIEWED),
            ai_context: doc.metadata.is_truthy(KEY_AI_CONTEXT),
            headings: doc.headings.iter().take(MAX_HEADINGS).cloned().collect(),
            links: doc.links.iter().take(MAX_LINKS).cloned().collect(),
            title,
            summary_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextIndex {
    pub generated: String,
    pub files: Vec<ContextIndexEntry>,
}

/// Accumulates entries in discovery order. The index is rebuilt from scratch on every run.
#[derive(Debug, Default)]
pub struct ContextIndexBuilder {
    files: Vec<ContextIndexEntry>,
}

impl ContextIndexBuilder {
    pub fn push(&mut self, doc: &Document) {
        self.files.push(ContextIndexEntry::from_document(doc));
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn finish(self, generated: String) -> ContextIndex {
        ContextIndex {
            generated,
            files: self.files,
        }
    }
}
