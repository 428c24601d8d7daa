// docaudit-core/src/application/summary.rs

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::domain::activity::summary::{
    ActivitySummary, SessionRecord, records_for_month, render_markdown, summarize,
};
use crate::error::AuditError;
use crate::infrastructure::activity_log::load_activity;
use crate::infrastructure::fs::{atomic_write, write_csv, write_json};

#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// `YYYY-MM`.
    pub month: String,
    pub logs_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Also export one CSV row per session.
    pub csv: bool,
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    month: &'a str,
    generated_at: String,
    #[serde(flatten)]
    summary: &'a ActivitySummary,
}

/// Column layout of `ai-summary-<month>.csv`.
#[derive(Serialize)]
struct SessionRow<'a> {
    timestamp: &'a str,
    route_type: &'a str,
    route_subtype: &'a str,
    agent: &'a str,
    reviewed_by: &'a str,
    has_outputs: bool,
    fallback_used: bool,
    context_len: usize,
    goal: &'a str,
}

impl<'a> From<&'a SessionRecord> for SessionRow<'a> {
    fn from(r: &'a SessionRecord) -> Self {
        Self {
            timestamp: &r.timestamp,
            route_type: &r.route_type,
            route_subtype: &r.route_subtype,
            agent: &r.agent,
            reviewed_by: &r.reviewed_by,
            has_outputs: r.has_outputs,
            fallback_used: r.fallback_used,
            context_len: r.context_len,
            goal: &r.goal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: ActivitySummary,
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
    pub csv_path: Option<PathBuf>,
}

/// Aggregates the month's activity logs and writes the JSON and Markdown digests, plus the
/// per-session CSV when asked.
///
/// Returns `Ok(None)` when no entry belongs to the month; nothing is written then.
#[instrument(skip(options), fields(month = %options.month))]
pub fn run_summary(options: &SummaryOptions) -> Result<Option<SummaryOutcome>, AuditError> {
    let prefix = format!("{}-", options.month);
    let activity = load_activity(&options.logs_dir, &prefix)?;
    let records = records_for_month(activity.entries(), &options.month);
    if records.is_empty() {
        return Ok(None);
    }

    let summary = summarize(&records);

    let json_path = options
        .out_dir
        .join(format!("ai-summary-{}.json", options.month));
    write_json(
        &json_path,
        &SummaryFile {
            month: &options.month,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            summary: &summary,
        },
    )?;

    let markdown_path = options
        .out_dir
        .join(format!("ai-summary-{}.md", options.month));
    atomic_write(&markdown_path, render_markdown(&options.month, &summary))?;

    let csv_path = if options.csv {
        let path = options
            .out_dir
            .join(format!("ai-summary-{}.csv", options.month));
        let rows: Vec<SessionRow<'_>> = records.iter().map(SessionRow::from).collect();
        write_csv(&path, &rows)?;
        Some(path)
    } else {
        None
    };

    info!(sessions = summary.counts.sessions, "Activity summary written");
    Ok(Some(SummaryOutcome {
        summary,
        json_path,
        markdown_path,
        csv_path,
    }))
}
