// docaudit-core/src/domain/policy/mod.rs

pub mod configuration;
pub mod defaults;
pub mod resolver;

// Re-exports
pub use configuration::{BucketGlobs, PolicyConfig, StrictPromotion};
pub use defaults::{DefaultPolicy, PathHeuristic};
pub use resolver::{PolicyResolver, right_anchored};
