// docaudit-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(docaudit::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- REPORTS / JSON ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(docaudit::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("CSV Export Error: {0}")]
    #[diagnostic(code(docaudit::infra::csv))]
    CsvError(#[from] csv::Error),

    // --- CONFIG ---
    #[error("Configuration Error: {0}")]
    #[diagnostic(code(docaudit::infra::config))]
    ConfigError(String),

    #[error("Policy configuration at '{path}' could not be read: {reason}")]
    #[diagnostic(
        code(docaudit::infra::config_unreadable),
        help("Fix or remove the policy file; defaults apply only when it is absent.")
    )]
    ConfigUnreadable { path: String, reason: String },
}
