// docaudit-core/src/infrastructure/activity_log.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::domain::activity::{ActivityEntry, ActivityLog};
use crate::infrastructure::error::InfrastructureError;

pub const ACTIVITY_LOG_DIR: &str = "ai-log";

/// `*.jsonl` files in `dir` whose name starts with `prefix`, sorted by name.
pub fn log_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, InfrastructureError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path.extension().is_some_and(|ext| ext == "jsonl")
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Parses one JSON Lines file. Blank and malformed lines are skipped.
pub fn read_entries(path: &Path) -> Result<Vec<ActivityEntry>, InfrastructureError> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    let mut entries = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match ActivityEntry::parse_line(line) {
            Ok(entry) => entries.push(entry),
            Err(e) => debug!(
                file = %path.display(),
                line = number + 1,
                error = %e,
                "Skipping activity line"
            ),
        }
    }
    Ok(entries)
}

/// Loads every log file of `dir` selected by `prefix` (empty prefix for all of them).
/// Files that cannot be read are skipped with a warning.
pub fn load_activity(dir: &Path, prefix: &str) -> Result<ActivityLog, InfrastructureError> {
    let mut entries = Vec::new();
    for file in log_files(dir, prefix)? {
        match read_entries(&file) {
            Ok(mut found) => entries.append(&mut found),
            Err(e) => warn!(file = %file.display(), error = %e, "Activity log unreadable"),
        }
    }
    info!(dir = %dir.display(), entries = entries.len(), "Activity log loaded");
    Ok(ActivityLog::new(entries))
}
