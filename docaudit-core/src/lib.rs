// docaudit-core/src/lib.rs

// 1. Documentation is not enforced yet
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (interfaces)
// The structured-text parser contract.
pub mod ports;

// 2. Domain
// Documents, policy, validators, findings, index and report.
// Depends on nothing but the ports.
pub mod domain;

// 3. Infrastructure (adapters)
// Parsers, policy file, discovery, activity logs, atomic writes.
pub mod infrastructure;

// 4. Application (use cases)
// Audit run and activity summary.
pub mod application;

// --- ERRORS ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::AuditError;
