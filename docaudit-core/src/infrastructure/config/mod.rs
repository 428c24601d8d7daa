pub mod policy;

pub use policy::{POLICY_FILE, load_policy};
