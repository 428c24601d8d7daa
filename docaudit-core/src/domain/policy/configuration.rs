// docaudit-core/src/domain/policy/configuration.rs

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationError};

/// Policy file (`docs/docs_audit.config.yaml`).
#[derive(Debug, Deserialize, Validate, Clone, Default, PartialEq)]
pub struct PolicyConfig {
    /// Bucket -> globs. Declaration order is significant: first match wins.
    #[serde(default, deserialize_with = "ordered_buckets")]
    #[validate(custom(function = "validate_bucket_names"))]
    pub paths: Vec<BucketGlobs>,

    #[serde(default)]
    #[validate(custom(function = "validate_intervals"))]
    pub review_intervals: BTreeMap<String, u32>,

    #[serde(default)]
    #[validate(length(min = 1, message = "required_keys cannot be empty when declared"))]
    pub required_keys: Option<Vec<String>>,

    #[serde(default)]
    pub strict: StrictPromotion,
}

/// Serialize is needed by the validator, which attaches the rejected value to its error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BucketGlobs {
    pub bucket: String,
    pub globs: Vec<String>,
}

/// Which checks `--strict` may escalate from warning to error.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StrictPromotion {
    /// Missing or malformed front matter and missing required keys.
    #[serde(default = "default_true")]
    pub front_matter: bool,
    #[serde(default = "default_true")]
    pub review_date: bool,
    #[serde(default = "default_true")]
    pub links: bool,
    #[serde(default = "default_true")]
    pub ai_logs: bool,
    /// Off by default: staleness only becomes an error through `--fail-on-stale`.
    #[serde(default)]
    pub staleness: bool,
}

impl Default for StrictPromotion {
    fn default() -> Self {
        Self {
            front_matter: true,
            review_date: true,
            links: true,
            ai_logs: true,
            staleness: false,
        }
    }
}

// --- VALIDATION ---

fn default_true() -> bool {
    true
}

fn validate_bucket_names(buckets: &[BucketGlobs]) -> Result<(), ValidationError> {
    if buckets.iter().any(|b| b.bucket.trim().is_empty()) {
        return Err(ValidationError::new("empty_bucket_name"));
    }
    Ok(())
}

fn validate_intervals(intervals: &BTreeMap<String, u32>) -> Result<(), ValidationError> {
    if intervals.values().any(|days| *days == 0) {
        let mut err = ValidationError::new("review_interval_zero");
        err.message = Some("review intervals must be at least one day".into());
        return Err(err);
    }
    Ok(())
}

// --- DÉSÉRIALISATION ORDONNÉE ---

/// Reads a `bucket: [globs]` mapping while keeping the declaration order.
/// A bucket declared with `null` (no globs) is kept with an empty list.
fn ordered_buckets<'de, D>(deserializer: D) -> Result<Vec<BucketGlobs>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedBuckets;

    impl<'de> Visitor<'de> for OrderedBuckets {
        type Value = Vec<BucketGlobs>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of bucket names to glob lists")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::new();
            while let Some((bucket, globs)) = map.next_entry::<String, Option<Vec<String>>>()? {
                out.push(BucketGlobs {
                    bucket,
                    globs: globs.unwrap_or_default(),
                });
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(OrderedBuckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_keep_declaration_order() -> anyhow::Result<()> {
        let yaml = r#"
paths:
  zeta: ["docs/z/**"]
  alpha: ["docs/a/**", "docs/aa/**"]
  empty:
review_intervals:
  zeta: 30
"#;
        let config: PolicyConfig = serde_yaml::from_str(yaml)?;
        let names: Vec<&str> = config.paths.iter().map(|b| b.bucket.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "empty"]);
        assert_eq!(config.paths[1].globs.len(), 2);
        assert!(config.paths[2].globs.is_empty());
        assert_eq!(config.review_intervals.get("zeta"), Some(&30));
        Ok(())
    }

    #[test]
    fn test_strict_table_defaults() -> anyhow::Result<()> {
        let config: PolicyConfig = serde_yaml::from_str("strict:\n  links: false\n")?;
        assert!(!config.strict.links);
        assert!(config.strict.front_matter);
        assert!(!config.strict.staleness);
        Ok(())
    }

    #[test]
    fn test_validation_rejects_empty_required_keys() -> anyhow::Result<()> {
        let config: PolicyConfig = serde_yaml::from_str("required_keys: []\n")?;
        assert!(config.validate().is_err());

        let ok: PolicyConfig = serde_yaml::from_str("required_keys: [title]\n")?;
        assert!(ok.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_validation_rejects_zero_interval() -> anyhow::Result<()> {
        let config: PolicyConfig = serde_yaml::from_str("review_intervals:\n  ai: 0\n")?;
        assert!(config.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_validation_rejects_blank_bucket_name() -> anyhow::Result<()> {
        let config: PolicyConfig = serde_yaml::from_str("paths:\n  \"  \": [\"docs/**\"]\n")?;
        assert!(config.validate().is_err());

        let ok: PolicyConfig = serde_yaml::from_str("paths:\n  guide: [\"guide/*.md\"]\n")?;
        assert!(ok.validate().is_ok());
        Ok(())
    }
}
