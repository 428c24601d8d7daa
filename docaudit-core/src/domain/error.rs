// docaudit-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid glob '{pattern}' for bucket '{bucket}': {reason}")]
    #[diagnostic(
        code(docaudit::domain::policy_glob),
        help("Bucket globs use the globset syntax (e.g. 'docs/1-governance/**').")
    )]
    InvalidBucketGlob {
        bucket: String,
        pattern: String,
        reason: String,
    },

    #[error("Invalid policy: {0}")]
    #[diagnostic(
        code(docaudit::domain::policy),
        help("Review intervals must be positive and required keys non-empty.")
    )]
    InvalidPolicy(String),

    #[error("Invalid --only pattern '{0}': {1}")]
    #[diagnostic(code(docaudit::domain::only_pattern))]
    InvalidOnlyPattern(String, String),
}
