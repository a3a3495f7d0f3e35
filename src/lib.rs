//! kv-doctor
//!
//! Health-check orchestrator for a clustered key-value store node: runs a
//! battery of independent diagnostic checks and reports one aggregated
//! status with monitoring-plugin exit codes.

/// Run configuration - layered sources frozen into one immutable value
pub mod config;

/// Check framework, built-in checks, orchestration, and rendering
pub mod health;

/// External collaborators - process table, HTTP interface, subprocesses
pub mod probes;

/// Storage engine version parsing and remediation-era classification
pub mod version;
