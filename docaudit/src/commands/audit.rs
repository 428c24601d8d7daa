// docaudit/src/commands/audit.rs
//
// USE CASE: audit the documentation tree and write report + context index.

use chrono::Local;
use tracing::debug;

use docaudit_core::application::{AuditOptions, print_report, run_audit};

use super::diagnostic;
use crate::cli::Cli;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

pub fn execute(cli: &Cli) -> i32 {
    let options = AuditOptions {
        root: cli.root.clone(),
        report_path: cli.report.clone(),
        config_path: cli.config.clone(),
        only: cli.only.clone(),
        since: cli.since,
        flags: cli.flags(),
        build_index: !cli.no_index,
        today: Local::now().date_naive(),
        parser: cli.parser.into(),
    };
    debug!(?options, "Starting audit");

    let outcome = match run_audit(&options) {
        Ok(outcome) => outcome,
        Err(e) => {
            let code = if e.is_configuration() {
                EXIT_USAGE
            } else {
                EXIT_FINDINGS
            };
            eprintln!("{:?}", diagnostic(e));
            return code;
        }
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    if let Err(e) = print_report(&outcome.report, &mut stdout.lock(), &mut stderr.lock()) {
        debug!(error = %e, "Console output truncated");
    }

    if outcome.report.has_errors() {
        EXIT_FINDINGS
    } else {
        EXIT_OK
    }
}
