// docaudit-core/src/application/mod.rs

pub mod audit;
pub mod console;
pub mod summary;

// Facade used by the binaries:
// `use docaudit_core::application::{run_audit, AuditOptions};`

pub use audit::{AuditOptions, AuditOutcome, run_audit};
pub use console::print_report;
pub use summary::{SummaryOptions, SummaryOutcome, run_summary};
