//! Resident memory check

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, CheckStatus, SystemCheck};
use crate::probes;

/// Classifies a resident-memory reading against the configured thresholds.
///
/// Strictly greater-than: a reading exactly at a threshold does not trip
/// it.
pub fn classify_rss(rss_bytes: u64, warn_bytes: u64, crit_bytes: u64) -> CheckStatus {
    if rss_bytes > crit_bytes {
        CheckStatus::Critical
    } else if rss_bytes > warn_bytes {
        CheckStatus::Warning
    } else {
        CheckStatus::Ok
    }
}

/// Checks the node's resident set size against warning/critical thresholds
pub struct RssCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> RssCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for RssCheck<'_> {
    fn name(&self) -> &'static str {
        "rss"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Compares node resident memory against configured thresholds")
    }

    fn check(&self) -> CheckResult {
        let name = &self.config.node.process_name;
        let Some(proc) = probes::find_node(name) else {
            return CheckResult::unknown(format!(
                "cannot measure resident memory: no running process named {:?}",
                name
            ));
        };

        let rss = self.config.rss.clone();
        let status = classify_rss(proc.rss_bytes, rss.warn_bytes, rss.crit_bytes);
        let message = format!(
            "resident memory {} bytes (pid {})",
            proc.rss_bytes, proc.pid
        );
        let details = vec![
            format!("  warning above:  {} bytes", rss.warn_bytes),
            format!("  critical above: {} bytes", rss.crit_bytes),
        ];

        match status {
            CheckStatus::Ok => CheckResult::ok(message),
            CheckStatus::Warning => CheckResult::warning(message),
            _ => CheckResult::critical(message),
        }
        .with_details(details)
    }
}
