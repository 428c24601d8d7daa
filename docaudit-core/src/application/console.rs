// docaudit-core/src/application/console.rs

use std::io::{self, Write};

use crate::domain::report::AuditReport;

/// Prints the summary line to `out` and every finding, errors first, to `err`.
pub fn print_report<O: Write, E: Write>(
    report: &AuditReport,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    writeln!(out, "{}", report.summary_line())?;
    for message in &report.errors {
        writeln!(err, "[docaudit][ERROR] {}", message)?;
    }
    for message in &report.warnings {
        writeln!(err, "[docaudit][WARN] {}", message)?;
    }
    Ok(())
}
