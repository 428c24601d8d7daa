// docaudit-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    // --- DOMAIN ERRORS (policy rules, patterns) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl AuditError {
    /// Configuration problems abort the run before scanning starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AuditError::Domain(_)
                | AuditError::Infrastructure(InfrastructureError::ConfigError(_))
                | AuditError::Infrastructure(InfrastructureError::ConfigUnreadable { .. })
        )
    }
}
