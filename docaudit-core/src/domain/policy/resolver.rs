// docaudit-core/src/domain/policy/resolver.rs

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use validator::Validate;

use super::configuration::{PolicyConfig, StrictPromotion};
use super::defaults::DefaultPolicy;
use crate::domain::error::DomainError;

/// Patterns to compile for one configured glob.
///
/// A relative pattern also matches from the right (`guide/*.md` covers `docs/guide/a.md`);
/// a pattern starting with `/` or `**/` is taken as written.
pub fn right_anchored(pattern: &str) -> Vec<String> {
    if pattern.starts_with('/') || pattern.starts_with("**/") {
        vec![pattern.to_string()]
    } else {
        vec![pattern.to_string(), format!("**/{}", pattern)]
    }
}

/// Compiled glob group of one bucket.
struct CompiledBucket {
    name: String,
    globs: GlobSet,
}

/// Maps document paths to buckets and buckets to staleness thresholds.
///
/// Resolution depends only on the path and the loaded configuration.
pub struct PolicyResolver {
    config: Option<PolicyConfig>,
    buckets: Vec<CompiledBucket>,
    defaults: DefaultPolicy,
    strict: StrictPromotion,
}

impl PolicyResolver {
    pub fn new(config: Option<PolicyConfig>, defaults: DefaultPolicy) -> Result<Self, DomainError> {
        let mut buckets = Vec::new();

        if let Some(cfg) = &config {
            cfg.validate()
                .map_err(|e| DomainError::InvalidPolicy(e.to_string()))?;

            for group in &cfg.paths {
                let mut builder = GlobSetBuilder::new();
                for pattern in &group.globs {
                    for variant in right_anchored(pattern) {
                        let glob = Glob::new(&variant).map_err(|e| DomainError::InvalidBucketGlob {
                            bucket: group.bucket.clone(),
                            pattern: pattern.clone(),
                            reason: e.to_string(),
                        })?;
                        builder.add(glob);
                    }
                }
                let globs = builder.build().map_err(|e| DomainError::InvalidBucketGlob {
                    bucket: group.bucket.clone(),
                    pattern: group.globs.join(", "),
                    reason: e.to_string(),
                })?;
                buckets.push(CompiledBucket {
                    name: group.bucket.clone(),
                    globs,
                });
            }
        }

        let strict = config.as_ref().map(|c| c.strict).unwrap_or_default();

        Ok(Self {
            config,
            buckets,
            defaults,
            strict,
        })
    }

    /// Resolver with no policy file: every document lands in the default bucket.
    pub fn unconfigured(defaults: DefaultPolicy) -> Self {
        Self {
            config: None,
            buckets: Vec::new(),
            strict: StrictPromotion::default(),
            defaults,
        }
    }

    pub fn bucket_for(&self, relative_path: &str) -> &str {
        if self.config.is_none() {
            return &self.defaults.default_bucket;
        }

        let path = relative_path.trim_start_matches("./");
        if let Some(bucket) = self.buckets.iter().find(|b| b.globs.is_match(path)) {
            debug!(path, bucket = %bucket.name, "bucket resolved by glob");
            return &bucket.name;
        }

        let anchored = format!("/{}", path.trim_start_matches('/'));
        self.defaults
            .heuristics
            .iter()
            .find(|h| h.matches(&anchored))
            .map(|h| h.bucket.as_str())
            .unwrap_or(&self.defaults.default_bucket)
    }

    pub fn max_days_for(&self, bucket: &str) -> u32 {
        self.config
            .as_ref()
            .and_then(|c| c.review_intervals.get(bucket).copied())
            .unwrap_or(self.defaults.default_max_days)
    }

    pub fn required_keys(&self) -> &[String] {
        self.config
            .as_ref()
            .and_then(|c| c.required_keys.as_deref())
            .unwrap_or(self.defaults.required_keys.as_slice())
    }

    pub fn strict_promotion(&self) -> &StrictPromotion {
        &self.strict
    }

    pub fn defaults_version(&self) -> u32 {
        self.defaults.version
    }
}
