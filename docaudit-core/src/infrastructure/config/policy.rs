// docaudit-core/src/infrastructure/config/policy.rs

use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::domain::policy::PolicyConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::StructuredTextParser;

pub const POLICY_FILE: &str = "docs_audit.config.yaml";

/// Loads the optional policy file.
///
/// - absent file: `Ok(None)`, the run uses the default policy only,
/// - unreadable or unparsable file: `ConfigUnreadable`, the run must stop before scanning,
/// - parser without nested sections: `Ok(None)` with a warning.
#[instrument(skip(parser), fields(parser = parser.name()))]
pub fn load_policy(
    path: &Path,
    parser: &dyn StructuredTextParser,
) -> Result<Option<PolicyConfig>, InfrastructureError> {
    if !path.exists() {
        info!(path = %path.display(), "No policy file, using built-in defaults");
        return Ok(None);
    }

    if !parser.supports_nesting() {
        warn!(
            path = %path.display(),
            "Policy file ignored: the minimal parser cannot read nested sections"
        );
        return Ok(None);
    }

    let unreadable = |reason: String| InfrastructureError::ConfigUnreadable {
        path: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
    let value = parser.parse(&content).map_err(|e| unreadable(e.0))?;

    // An empty file is a valid, empty policy.
    if value.is_null() {
        return Ok(Some(PolicyConfig::default()));
    }

    let config: PolicyConfig =
        serde_yaml::from_value(value).map_err(|e| unreadable(e.to_string()))?;

    info!(
        buckets = config.paths.len(),
        intervals = config.review_intervals.len(),
        "Policy loaded"
    );
    Ok(Some(config))
}
