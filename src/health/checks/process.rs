//! Node process liveness check

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes;

/// Checks that the node process is present in the process table
///
/// This is the gate for the liveness-dependent checks: the orchestrator
/// only probes ping/stats/membership when this one passes.
pub struct ProcessCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> ProcessCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for ProcessCheck<'_> {
    fn name(&self) -> &'static str {
        "process"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Looks for the node executable in the process table")
    }

    fn check(&self) -> CheckResult {
        let name = &self.config.node.process_name;
        match probes::find_node(name) {
            Some(proc) => CheckResult::ok(format!(
                "process {:?} running with pid {}",
                name, proc.pid
            )),
            None => CheckResult::critical(format!("no running process named {:?}", name)),
        }
    }
}
