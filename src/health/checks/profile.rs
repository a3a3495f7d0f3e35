//! Sampling profiler capture (advisory)

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes;
use crate::probes::command::{self, ProfilerOutcome};

/// Captures a best-effort profile sample of the running node
///
/// Advisory: profiling is diagnostic color, never part of the verdict. An
/// uninstalled profiler skips the capture rather than failing anything.
pub struct ProfileCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> ProfileCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for ProfileCheck<'_> {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Samples the node process with the configured profiler")
    }

    fn advisory(&self) -> bool {
        true
    }

    fn check(&self) -> CheckResult {
        let Some(proc) = probes::find_node(&self.config.node.process_name) else {
            return CheckResult::unknown("no node process to profile".to_string());
        };

        match command::run_profiler(&self.config.profiler, proc.pid) {
            ProfilerOutcome::Captured(lines) => CheckResult::ok(format!(
                "captured {}s profile of pid {}",
                self.config.profiler.duration_secs, proc.pid
            ))
            .with_details(lines),
            ProfilerOutcome::Unavailable => CheckResult::ok(format!(
                "profiler {:?} not installed; capture skipped",
                self.config.profiler.cmd
            )),
            ProfilerOutcome::Failed(reason) => CheckResult::warning(reason),
        }
    }
}
