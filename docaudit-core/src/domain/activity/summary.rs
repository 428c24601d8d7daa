// docaudit-core/src/domain/activity/summary.rs
//
// Monthly aggregation of AI activity sessions (counts, breakdowns, risk lists).

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use super::ActivityEntry;

/// Sessions reading more context files than this are flagged.
pub const LARGE_CONTEXT_THRESHOLD: usize = 150;

const UNKNOWN: &str = "unknown";
const PLACEHOLDER: &str = "TBD";

fn re_adr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"ADR-\d{3}")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// `YYYY-MM` of an RFC 3339 timestamp, or of a `YYYY-MM-DD…` prefix.
pub fn month_of(timestamp: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp.trim()) {
        return Some(dt.format("%Y-%m").to_string());
    }
    let prefix = timestamp.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m").to_string())
}

/// An entry flattened for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub timestamp: String,
    pub month: Option<String>,
    pub route_type: String,
    pub route_subtype: String,
    pub goal: String,
    pub context_len: usize,
    pub outputs: Vec<String>,
    pub has_outputs: bool,
    pub agent: String,
    pub reviewed_by: String,
    pub reviewed: bool,
    pub fallback_used: bool,
    pub adrs: Vec<String>,
}

impl SessionRecord {
    pub fn from_entry(entry: &ActivityEntry) -> Self {
        let non_empty = |v: &Option<String>, default: &str| {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        let route = entry.route.clone().unwrap_or_default();
        let timestamp = entry.timestamp.clone().unwrap_or_default();

        let mut adrs = BTreeSet::new();
        for decision in entry.decisions.as_deref().unwrap_or_default() {
            collect_adrs(decision, &mut adrs);
        }

        Self {
            month: month_of(&timestamp),
            timestamp,
            route_type: non_empty(&route.kind, UNKNOWN),
            route_subtype: non_empty(&route.subtype, UNKNOWN),
            goal: entry.goal.clone().unwrap_or_default(),
            context_len: entry.context_files.as_ref().map_or(0, Vec::len),
            outputs: entry.outputs().to_vec(),
            has_outputs: !entry.outputs().is_empty(),
            agent: non_empty(&entry.agent, PLACEHOLDER),
            reviewed_by: non_empty(&entry.reviewed_by, PLACEHOLDER),
            reviewed: entry.is_reviewed(),
            fallback_used: entry.fallback.unwrap_or(false),
            adrs: adrs.into_iter().collect(),
        }
    }

    fn label(&self) -> String {
        format!("{} — {}", self.timestamp, self.goal)
    }
}

/// ADR references found in string decisions or in the string values of object decisions.
fn collect_adrs(decision: &serde_json::Value, out: &mut BTreeSet<String>) {
    let mut scan = |text: &str| {
        for m in re_adr().find_iter(text) {
            out.insert(m.as_str().to_string());
        }
    };
    match decision {
        serde_json::Value::String(s) => scan(s),
        serde_json::Value::Object(map) => map
            .values()
            .filter_map(|v| v.as_str())
            .for_each(&mut scan),
        _ => {}
    }
}

/// Records of `month`. Entries without a usable timestamp are attributed to the requested
/// month (their file name already selected it).
pub fn records_for_month<'a>(
    entries: impl IntoIterator<Item = &'a ActivityEntry>,
    month: &str,
) -> Vec<SessionRecord> {
    entries
        .into_iter()
        .map(SessionRecord::from_entry)
        .filter_map(|mut rec| {
            let belongs = rec.month.as_deref().is_none_or(|m| m == month);
            if belongs {
                rec.month = Some(month.to_string());
                Some(rec)
            } else {
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCounts {
    pub sessions: usize,
    pub with_outputs: usize,
    pub reviewed: usize,
    pub fallback_est: usize,
    pub avg_ctx: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteBreakdown {
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: String,
    pub sessions: usize,
    pub with_outputs_pct: f64,
    pub reviewed_pct: f64,
    pub avg_ctx: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentBreakdown {
    pub agent: String,
    pub sessions: usize,
    pub reviewed_pct: f64,
    pub avg_outputs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerBreakdown {
    pub reviewer: String,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Risks {
    pub no_outputs: Vec<String>,
    pub no_reviewer: Vec<String>,
    pub fallback_routes: Vec<String>,
    pub large_context: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub counts: SummaryCounts,
    pub by_route: Vec<RouteBreakdown>,
    pub by_agent: Vec<AgentBreakdown>,
    pub by_reviewer: Vec<ReviewerBreakdown>,
    pub risks: Risks,
    pub files_created: Vec<String>,
    pub adrs_touched: Vec<String>,
}

impl ActivitySummary {
    /// Share of sessions without a named reviewer, in percent.
    pub fn unreviewed_pct(&self) -> f64 {
        let sessions = self.counts.sessions;
        if sessions == 0 {
            return 0.0;
        }
        100.0 * (sessions - self.counts.reviewed) as f64 / sessions as f64
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn pct(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        round_to(100.0 * n as f64 / d as f64, 1)
    }
}

fn mean(total: usize, n: usize, decimals: i32) -> f64 {
    if n == 0 {
        0.0
    } else {
        round_to(total as f64 / n as f64, decimals)
    }
}

// --- AGRÉGATION ---

pub fn summarize(records: &[SessionRecord]) -> ActivitySummary {
    let n = records.len();
    let counts = SummaryCounts {
        sessions: n,
        with_outputs: records.iter().filter(|r| r.has_outputs).count(),
        reviewed: records.iter().filter(|r| r.reviewed).count(),
        fallback_est: records.iter().filter(|r| r.fallback_used).count(),
        avg_ctx: mean(records.iter().map(|r| r.context_len).sum(), n, 1),
    };

    let mut routes: BTreeMap<(&str, &str), Vec<&SessionRecord>> = BTreeMap::new();
    let mut agents: BTreeMap<&str, Vec<&SessionRecord>> = BTreeMap::new();
    let mut reviewers: BTreeMap<&str, usize> = BTreeMap::new();

    for r in records {
        routes
            .entry((r.route_type.as_str(), r.route_subtype.as_str()))
            .or_default()
            .push(r);
        agents.entry(r.agent.as_str()).or_default().push(r);
        if r.reviewed {
            *reviewers.entry(r.reviewed_by.as_str()).or_default() += 1;
        }
    }

    let by_route = routes
        .into_iter()
        .map(|((kind, subtype), items)| {
            let m = items.len();
            RouteBreakdown {
                kind: kind.to_string(),
                subtype: subtype.to_string(),
                sessions: m,
                with_outputs_pct: pct(items.iter().filter(|x| x.has_outputs).count(), m),
                reviewed_pct: pct(items.iter().filter(|x| x.reviewed).count(), m),
                avg_ctx: mean(items.iter().map(|x| x.context_len).sum(), m, 1),
            }
        })
        .collect();

    let by_agent = agents
        .into_iter()
        .map(|(agent, items)| {
            let m = items.len();
            AgentBreakdown {
                agent: agent.to_string(),
                sessions: m,
                reviewed_pct: pct(items.iter().filter(|x| x.reviewed).count(), m),
                avg_outputs: mean(items.iter().map(|x| x.outputs.len()).sum(), m, 2),
            }
        })
        .collect();

    let by_reviewer = reviewers
        .into_iter()
        .map(|(reviewer, sessions)| ReviewerBreakdown {
            reviewer: reviewer.to_string(),
            sessions,
        })
        .collect();

    let risks = Risks {
        no_outputs: records
            .iter()
            .filter(|r| !r.has_outputs)
            .map(SessionRecord::label)
            .collect(),
        no_reviewer: records
            .iter()
            .filter(|r| !r.reviewed)
            .map(SessionRecord::label)
            .collect(),
        fallback_routes: records
            .iter()
            .filter(|r| r.fallback_used)
            .map(SessionRecord::label)
            .collect(),
        large_context: records
            .iter()
            .filter(|r| r.context_len > LARGE_CONTEXT_THRESHOLD)
            .map(|r| format!("{} — ctx={} — {}", r.timestamp, r.context_len, r.goal))
            .collect(),
    };

    let files_created: BTreeSet<&String> = records.iter().flat_map(|r| &r.outputs).collect();
    let adrs_touched: BTreeSet<&String> = records.iter().flat_map(|r| &r.adrs).collect();

    ActivitySummary {
        counts,
        by_route,
        by_agent,
        by_reviewer,
        risks,
        files_created: files_created.into_iter().cloned().collect(),
        adrs_touched: adrs_touched.into_iter().cloned().collect(),
    }
}

// --- RENDU MARKDOWN ---

/// Markdown digest of a month's activity.
pub fn render_markdown(month: &str, summary: &ActivitySummary) -> String {
    let c = &summary.counts;
    let mut out = vec![
        format!("# AI Activity Summary — {}", month),
        String::new(),
        "## Overview".to_string(),
        format!("- Sessions: {}", c.sessions),
        format!(
            "- With outputs: {} ({:.1}%)",
            c.with_outputs,
            pct(c.with_outputs, c.sessions)
        ),
        format!("- Reviewed: {} ({:.1}%)", c.reviewed, pct(c.reviewed, c.sessions)),
        format!("- Fallback estimate: {}", c.fallback_est),
        format!("- Avg context size: {:.1} files", c.avg_ctx),
        String::new(),
        "## By Route".to_string(),
        "| type | subtype | sessions | outputs % | reviewed % | avg ctx |".to_string(),
        "|---|---|---:|---:|---:|---:|".to_string(),
    ];
    for r in &summary.by_route {
        out.push(format!(
            "| {} | {} | {} | {:.1} | {:.1} | {:.1} |",
            r.kind, r.subtype, r.sessions, r.with_outputs_pct, r.reviewed_pct, r.avg_ctx
        ));
    }
    out.push(String::new());

    let risks = &summary.risks;
    out.push("## Risks".to_string());
    out.push(format!("- No outputs: {}", risks.no_outputs.len()));
    out.push(format!("- No reviewer: {}", risks.no_reviewer.len()));
    out.push(format!("- Fallback routes: {}", risks.fallback_routes.len()));
    out.push(format!(
        "- Large context (>{} files): {}",
        LARGE_CONTEXT_THRESHOLD,
        risks.large_context.len()
    ));
    out.push(String::new());
    for (title, items) in [
        ("No outputs", &risks.no_outputs),
        ("No reviewer", &risks.no_reviewer),
    ] {
        if !items.is_empty() {
            out.push(format!("**{} (examples):**", title));
            out.extend(items.iter().take(10).map(|i| format!("- {}", i)));
            out.push(String::new());
        }
    }

    out.push("## Files Created/Updated".to_string());
    if summary.files_created.is_empty() {
        out.push("(none)".to_string());
    } else {
        out.extend(
            summary
                .files_created
                .iter()
                .take(100)
                .map(|f| format!("- {}", f)),
        );
    }
    out.push(String::new());

    out.push("## ADRs Referenced".to_string());
    if summary.adrs_touched.is_empty() {
        out.push("(none)".to_string());
    } else {
        out.extend(summary.adrs_touched.iter().map(|a| format!("- {}", a)));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(lines: &[&str]) -> anyhow::Result<Vec<ActivityEntry>> {
        lines
            .iter()
            .map(|l| ActivityEntry::parse_line(l).map_err(Into::into))
            .collect()
    }

    fn two_sessions() -> anyhow::Result<Vec<ActivityEntry>> {
        entries(&[
            r#"{"timestamp": "2025-10-05T12:00:00Z", "agent": "Claude",
                "route": {"type": "plan", "subtype": "module"}, "goal": "test1",
                "context_files": ["docs/a.md"], "outputs": ["docs/x.md"],
                "reviewed_by": "Reviewer", "fallback": false,
                "decisions": [{"note": "follows ADR-012"}, "see ADR-003 and ADR-012"]}"#,
            r#"{"timestamp": "2025-10-05T13:00:00Z", "agent": "Cursor",
                "route": {"type": "docs", "subtype": "_default"}, "goal": "test2",
                "context_files": [], "outputs": [], "reviewed_by": "TBD", "fallback": true}"#,
        ])
    }

    #[test]
    fn test_counts_reviewed_and_outputs() -> anyhow::Result<()> {
        let entries = two_sessions()?;
        let records = records_for_month(&entries, "2025-10");
        let summary = summarize(&records);

        assert_eq!(summary.counts.sessions, 2);
        assert_eq!(summary.counts.reviewed, 1);
        assert_eq!(summary.counts.with_outputs, 1);
        assert_eq!(summary.counts.fallback_est, 1);
        assert_eq!(summary.counts.avg_ctx, 0.5);
        assert_eq!(summary.unreviewed_pct(), 50.0);
        assert_eq!(summary.files_created, vec!["docs/x.md".to_string()]);
        assert_eq!(summary.adrs_touched, vec!["ADR-003", "ADR-012"]);
        assert_eq!(summary.by_reviewer.len(), 1);
        assert_eq!(summary.by_route[0].kind, "docs");
        assert_eq!(summary.risks.no_outputs, vec!["2025-10-05T13:00:00Z — test2"]);
        Ok(())
    }

    #[test]
    fn test_month_filtering() -> anyhow::Result<()> {
        let entries = entries(&[
            r#"{"timestamp": "2025-09-30T23:00:00Z"}"#,
            r#"{"timestamp": "2025-10-01 08:00:00"}"#,
            r#"{"timestamp": "garbage"}"#,
        ])?;
        let records = records_for_month(&entries, "2025-10");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.month.as_deref() == Some("2025-10")));
        Ok(())
    }

    #[test]
    fn test_month_of_shapes() {
        assert_eq!(month_of("2025-10-05T12:34:56Z").as_deref(), Some("2025-10"));
        assert_eq!(month_of("2025-10-05T12:34:56+02:00").as_deref(), Some("2025-10"));
        assert_eq!(month_of("2025-11-05 12:34:56").as_deref(), Some("2025-11"));
        assert_eq!(month_of(""), None);
    }

    #[test]
    fn test_markdown_overview() -> anyhow::Result<()> {
        let entries = two_sessions()?;
        let summary = summarize(&records_for_month(&entries, "2025-10"));
        let md = render_markdown("2025-10", &summary);
        let overview: Vec<&str> = md.lines().skip(3).take(3).collect();
        insta::assert_snapshot!(overview.join("\n"), @r"
        - Sessions: 2
        - With outputs: 1 (50.0%)
        - Reviewed: 1 (50.0%)
        ");
        assert!(md.contains("| plan | module | 1 | 100.0 | 100.0 | 1.0 |"));
        assert!(md.contains("- Avg context size: 0.5 files"));
        assert!(md.contains("- ADR-012"));
        Ok(())
    }
}
