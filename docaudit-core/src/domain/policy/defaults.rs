// docaudit-core/src/domain/policy/defaults.rs

use crate::domain::document::metadata::{KEY_CONTEXT, KEY_LAST_REVIEWED, KEY_TITLE, KEY_VERSION};

/// Path-substring rule used when no configured glob matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathHeuristic {
    pub bucket: String,
    /// Any of these substrings (searched in `/<relative path>`) selects the bucket.
    pub needles: Vec<String>,
}

impl PathHeuristic {
    fn new(bucket: &str, needles: &[&str]) -> Self {
        Self {
            bucket: bucket.to_string(),
            needles: needles.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.needles.iter().any(|n| path.contains(n.as_str()))
    }
}

/// Built-in policy applied where the policy file is silent.
///
/// Passed into the resolver explicitly so alternate defaults can be substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPolicy {
    pub version: u32,
    pub default_bucket: String,
    pub default_max_days: u32,
    /// Evaluated in order, first match wins.
    pub heuristics: Vec<PathHeuristic>,
    pub required_keys: Vec<String>,
}

impl DefaultPolicy {
    pub fn v1() -> Self {
        Self {
            version: 1,
            default_bucket: "default".to_string(),
            default_max_days: 180,
            heuristics: vec![
                PathHeuristic::new("ai", &["/ai/", "ai-response-protocol"]),
                PathHeuristic::new(
                    "governance",
                    &["/1-governance/", "change-management-policy"],
                ),
                PathHeuristic::new("fea", &["/6-fea/"]),
                PathHeuristic::new("modules", &["/5-modules/"]),
                PathHeuristic::new("libraries", &["/3-libraries/"]),
            ],
            required_keys: [KEY_TITLE, KEY_VERSION, KEY_CONTEXT, KEY_LAST_REVIEWED]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self::v1()
    }
}
