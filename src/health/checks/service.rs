//! Service-manager status check (advisory)

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes::command;

/// Reports the service manager's view of the node service
///
/// Advisory: the state is useful context for the operator, but a failed
/// query or an odd state never feeds the aggregated exit code.
pub struct ServiceCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> ServiceCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for ServiceCheck<'_> {
    fn name(&self) -> &'static str {
        "service"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Asks the service manager for the node service's state")
    }

    fn advisory(&self) -> bool {
        true
    }

    fn check(&self) -> CheckResult {
        let service = &self.config.service;
        match command::service_state(service) {
            Some(state) if state == "online" => {
                CheckResult::ok(format!("service {} is online", service.name))
            }
            Some(state) => {
                CheckResult::warning(format!("service {} is {}", service.name, state))
            }
            None => CheckResult::unknown(format!(
                "service manager query failed for {}",
                service.name
            )),
        }
    }
}
