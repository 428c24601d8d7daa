pub mod activity;
pub mod document;
pub mod error;
pub mod finding;
pub mod index;
pub mod policy;
pub mod report;
pub mod validators;

// Re-exports used across the infrastructure and application layers
pub use error::DomainError;
pub use finding::{Check, Finding, Severity, StaleEntry};
pub use report::{AuditReport, SeverityAggregator, Status};
