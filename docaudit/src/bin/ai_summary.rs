// docaudit/src/bin/ai_summary.rs
//
// Monthly digest of the AI activity log (ai-log/<YYYY-MM>-*.jsonl).

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;
use tracing::Level;

use docaudit_core::application::{SummaryOptions, run_summary};
use docaudit_core::domain::activity::ActivitySummary;

fn parse_month(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .map(|_| value.to_string())
        .map_err(|_| format!("invalid month '{}', expected YYYY-MM", value))
}

#[derive(Parser, Debug)]
#[command(name = "ai-summary")]
#[command(about = "Summarise a month of AI activity sessions", long_about = None)]
#[command(version)]
struct Args {
    /// YYYY-MM (default: current UTC month)
    #[arg(long, value_parser = parse_month)]
    month: Option<String>,

    /// Activity log directory
    #[arg(long, default_value = "ai-log")]
    logs: PathBuf,

    /// Output directory for the JSON and Markdown digests
    #[arg(long, default_value = "reports/ai")]
    out: PathBuf,

    /// Also write ai-summary-<month>.csv (one row per session)
    #[arg(long)]
    csv: bool,

    /// Exit 1 when the unreviewed share exceeds --threshold
    #[arg(long)]
    strict: bool,

    /// Maximum unreviewed percentage tolerated under --strict
    #[arg(long, default_value_t = 20.0)]
    threshold: f64,

    /// Debug logging on stderr
    #[arg(long, short)]
    verbose: bool,
}

fn route_table(summary: &ActivitySummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "type",
        "subtype",
        "sessions",
        "outputs %",
        "reviewed %",
        "avg ctx",
    ]);
    for route in &summary.by_route {
        table.add_row(vec![
            route.kind.clone(),
            route.subtype.clone(),
            route.sessions.to_string(),
            format!("{:.1}", route.with_outputs_pct),
            format!("{:.1}", route.reviewed_pct),
            format!("{:.1}", route.avg_ctx),
        ]);
    }
    table
}

fn run(args: Args) -> Result<i32> {
    let month = args
        .month
        .unwrap_or_else(|| Utc::now().format("%Y-%m").to_string());

    let options = SummaryOptions {
        month: month.clone(),
        logs_dir: args.logs.clone(),
        out_dir: args.out,
        csv: args.csv,
    };
    let outcome = run_summary(&options)
        .with_context(|| format!("Failed to summarise activity for {}", month))?;

    let Some(outcome) = outcome else {
        println!(
            "[ai_summary] No logs found for {} in {}",
            month,
            args.logs.display()
        );
        return Ok(2);
    };

    println!("{}", route_table(&outcome.summary));
    println!("[ai_summary] Wrote {}", outcome.json_path.display());
    println!("[ai_summary] Wrote {}", outcome.markdown_path.display());
    if let Some(csv_path) = &outcome.csv_path {
        println!("[ai_summary] Wrote {}", csv_path.display());
    }

    let unreviewed = outcome.summary.unreviewed_pct();
    if args.strict && unreviewed > args.threshold {
        eprintln!(
            "[ai_summary] STRICT FAIL: {:.1}% unreviewed > {:.1}% threshold",
            unreviewed, args.threshold
        );
        return Ok(1);
    }
    Ok(0)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    let code = run(args)?;
    std::process::exit(code);
}
