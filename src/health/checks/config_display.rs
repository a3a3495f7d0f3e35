//! Effective configuration and node version display

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes::command;

/// Shows the effective configuration and the node's reported version
///
/// Mostly a display, but it does validate the one internal consistency
/// rule the thresholds have.
pub struct ConfigDisplayCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> ConfigDisplayCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for ConfigDisplayCheck<'_> {
    fn name(&self) -> &'static str {
        "config"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Shows the effective configuration and node version")
    }

    fn check(&self) -> CheckResult {
        let cfg = self.config;
        let version = command::node_version(&cfg.node)
            .unwrap_or_else(|| "unavailable".to_string());

        let details = vec![
            format!("  node version: {}", version),
            format!("  http endpoint: {}:{}", cfg.http.host, cfg.http.port),
            format!("  request timeout: {}s", cfg.http.timeout_secs),
            format!(
                "  rss thresholds: warn > {} bytes, crit > {} bytes",
                cfg.rss.warn_bytes, cfg.rss.crit_bytes
            ),
            format!("  service: {} (via {})", cfg.service.name, cfg.service.manager_cmd),
            format!("  storage log root: {}", cfg.storage.log_root.display()),
        ];

        if cfg.rss.warn_bytes >= cfg.rss.crit_bytes {
            return CheckResult::warning(
                "rss warning threshold is not below the critical threshold",
            )
            .with_details(details);
        }

        CheckResult::ok(format!("configuration loaded (profile {:?})", cfg.profile))
            .with_details(details)
    }
}
