//! Health check battery for a clustered key-value store node
//!
//! This module provides the diagnostic framework: the check trait and
//! result types, the built-in checks, the orchestrator that decides which
//! checks run, and the mode-aware rendering.
//!
//! # Example
//!
//! ```no_run
//! use kv_doctor::config::DoctorConfig;
//! use kv_doctor::health;
//!
//! let config = DoctorConfig::default();
//! let report = health::run(&config);
//!
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{Reporter, format_summary, monitoring_line};
pub use runner::{CheckKind, CheckOutcome, HealthReport, Orchestrator};

use crate::config::DoctorConfig;

/// Runs the full battery against the configured node and returns a report
pub fn run(config: &DoctorConfig) -> HealthReport {
    Orchestrator::new(config).run_battery()
}

/// Runs exactly one named check
pub fn run_single(config: &DoctorConfig, kind: CheckKind) -> HealthReport {
    Orchestrator::new(config).run_single(kind)
}
