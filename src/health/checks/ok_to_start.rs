//! Stopped-node start preconditions

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks whether a stopped node could be started right now
///
/// Runs in place of the liveness-dependent checks when the process is
/// down: the storage root must be reachable and nothing else may already
/// hold the node's listen port.
pub struct OkToStartCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> OkToStartCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }

    /// True when some other process answers on the node's port
    fn port_occupied(&self) -> Result<bool, String> {
        let http = &self.config.http;
        let target = format!("{}:{}", http.host, http.port);
        let mut addrs = target
            .to_socket_addrs()
            .map_err(|err| format!("cannot resolve {}: {}", target, err))?;
        let Some(addr) = addrs.next() else {
            return Err(format!("{} resolves to no addresses", target));
        };
        Ok(TcpStream::connect_timeout(&addr, Duration::from_secs(1)).is_ok())
    }
}

impl SystemCheck for OkToStartCheck<'_> {
    fn name(&self) -> &'static str {
        "oktostart"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Verifies a stopped node's start preconditions")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let root = &self.config.storage.log_root;
        let root_ok = root.is_dir();
        if root_ok {
            details.push(format!("  storage root {} is present", root.display()));
        } else {
            details.push(format!("  storage root {} is missing", root.display()));
        }

        let http = &self.config.http;
        match self.port_occupied() {
            Ok(true) => {
                details.push(format!("  {}:{} already has a listener", http.host, http.port));
                return CheckResult::critical(format!(
                    "something is already listening on {}:{}",
                    http.host, http.port
                ))
                .with_details(details);
            }
            Ok(false) => {
                details.push(format!("  {}:{} is free", http.host, http.port));
            }
            Err(reason) => {
                return CheckResult::unknown(reason).with_details(details);
            }
        }

        if !root_ok {
            return CheckResult::warning(format!(
                "storage root {} does not exist; it will be created on first start",
                root.display()
            ))
            .with_details(details);
        }

        CheckResult::ok("node looks ready to start").with_details(details)
    }
}
