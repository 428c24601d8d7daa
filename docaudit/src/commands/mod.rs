// docaudit/src/commands/mod.rs

pub mod audit;

use docaudit_core::AuditError;
use miette::Report;

/// Renders a fatal error with its diagnostic code and help.
pub fn diagnostic(err: AuditError) -> Report {
    match err {
        AuditError::Domain(e) => Report::new(e),
        AuditError::Infrastructure(e) => Report::new(e),
    }
}
