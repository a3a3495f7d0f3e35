//! Host system summary check

use sysinfo::System;

use crate::health::check::{CheckResult, SystemCheck};

/// Summarizes the host the node runs on: OS, CPU, memory, load
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "system"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Summarizes OS, CPU, memory, and load on the node's host")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new_all();
        sys.refresh_all();

        let mut details = Vec::new();

        // OS information
        let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());
        let kernel_version = System::kernel_version().unwrap_or_else(|| "Unknown".to_string());

        details.push(format!("  OS: {} {}", os_name, os_version));
        details.push(format!("  Kernel: {}", kernel_version));

        // CPU information
        let physical_cores = System::physical_core_count().unwrap_or(0);
        let logical_cores = sys.cpus().len();

        if physical_cores == 0 || logical_cores == 0 {
            return CheckResult::warning("unable to detect CPU cores")
                .with_details(details);
        }

        details.push(format!(
            "  CPU cores: {} physical, {} logical",
            physical_cores, logical_cores
        ));

        let load = System::load_average();
        details.push(format!(
            "  Load: {:.2} / {:.2} / {:.2}",
            load.one, load.five, load.fifteen
        ));

        // Memory information
        let total = sys.total_memory();
        let available = sys.available_memory();
        details.push(format!(
            "  Memory: {} bytes total, {} bytes available",
            total, available
        ));

        if total == 0 {
            return CheckResult::warning("unable to read memory totals").with_details(details);
        }
        // Under 5% available memory means the node is one compaction away
        // from the OOM killer.
        if available < total / 20 {
            return CheckResult::warning(format!(
                "less than 5% of memory available ({} of {} bytes)",
                available, total
            ))
            .with_details(details);
        }

        CheckResult::ok("host system looks healthy").with_details(details)
    }
}
