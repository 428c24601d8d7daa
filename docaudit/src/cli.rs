// docaudit/src/cli.rs
//
// Single source of truth for the `docaudit` command line (Clap structs).

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use docaudit_core::domain::validators::RunFlags;
use docaudit_core::infrastructure::ParserKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParserArg {
    /// Full YAML front matter and policy file
    Full,
    /// Flat `key: value` lines only; the policy file is ignored
    Minimal,
}

impl From<ParserArg> for ParserKind {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Full => ParserKind::Full,
            ParserArg::Minimal => ParserKind::Minimal,
        }
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

#[derive(Parser, Debug)]
#[command(name = "docaudit")]
#[command(
    about = "Governance audit for documentation trees (front matter, staleness, links)",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Repository root; `<root>/docs` is scanned
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Promote governance warnings to errors
    #[arg(long)]
    pub strict: bool,

    /// Do not write docs/context_index.json
    #[arg(long)]
    pub no_index: bool,

    /// Report destination (default: <root>/docs/docs_audit_report.json)
    #[arg(long, env = "DOCAUDIT_REPORT")]
    pub report: Option<PathBuf>,

    /// Only documents modified on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub since: Option<NaiveDate>,

    /// Restrict the scan to a file path, path suffix or glob
    #[arg(long)]
    pub only: Option<String>,

    /// Stale documents fail the run
    #[arg(long)]
    pub fail_on_stale: bool,

    /// Verify that relative links resolve
    #[arg(long)]
    pub check_links: bool,

    /// Verify #fragment links against headings (best effort, warnings only)
    #[arg(long)]
    pub check_anchors: bool,

    /// Verify that ai_generated documents appear in ai-log/*.jsonl
    #[arg(long)]
    pub check_ai_logs: bool,

    /// Policy file (default: <root>/docs/docs_audit.config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Front-matter parser implementation
    #[arg(long, value_enum, default_value_t = ParserArg::Full)]
    pub parser: ParserArg,

    /// Debug logging on stderr
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn flags(&self) -> RunFlags {
        RunFlags {
            strict: self.strict,
            fail_on_stale: self.fail_on_stale,
            check_links: self.check_links,
            check_anchors: self.check_anchors,
            check_ai_logs: self.check_ai_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_cli_defaults() {
        let args = Cli::parse_from(["docaudit"]);
        assert_eq!(args.root.to_string_lossy(), ".");
        assert_eq!(args.parser, ParserArg::Full);
        assert_eq!(args.since, None);
        assert!(!args.no_index);
        assert_eq!(args.flags(), RunFlags::default());
    }

    #[test]
    fn test_cli_flags_and_since() -> Result<()> {
        let args = Cli::try_parse_from([
            "docaudit",
            "--root",
            "/tmp/repo",
            "--strict",
            "--check-links",
            "--since",
            "2025-01-31",
            "--only",
            "docs/1-governance/**",
            "--parser",
            "minimal",
        ])?;
        assert_eq!(args.root.to_string_lossy(), "/tmp/repo");
        assert!(args.flags().strict);
        assert!(args.flags().check_links);
        assert!(!args.flags().check_ai_logs);
        assert_eq!(args.since, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(args.only.as_deref(), Some("docs/1-governance/**"));
        assert_eq!(ParserKind::from(args.parser), ParserKind::Minimal);
        Ok(())
    }

    #[test]
    fn test_cli_rejects_bad_since() {
        assert!(Cli::try_parse_from(["docaudit", "--since", "31/01/2025"]).is_err());
        assert!(Cli::try_parse_from(["docaudit", "--since", "2025-02-30"]).is_err());
    }
}
