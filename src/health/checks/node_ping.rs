//! Local control-script ping check

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes::command;

/// Pings the node through its own control script, under its service account
pub struct NodePingCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> NodePingCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for NodePingCheck<'_> {
    fn name(&self) -> &'static str {
        "nodeping"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Runs the node control script's ping as the service account")
    }

    fn check(&self) -> CheckResult {
        match command::node_ping(&self.config.node) {
            Ok(reply) if reply.is_empty() => CheckResult::ok("local ping succeeded"),
            Ok(reply) => CheckResult::ok(format!("local ping succeeded: {}", reply)),
            Err(reason) => CheckResult::critical(reason),
        }
    }
}
