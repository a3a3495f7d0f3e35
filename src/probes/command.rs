//! Subprocess collaborators: service manager, node control script, profiler
//!
//! All invocations are single-shot with no retries. Best-effort
//! collaborators (service manager, profiler) return `Option`/dedicated
//! outcome types so callers discard failures deliberately instead of
//! implicitly.

use std::process::Command;

use tracing::{debug, warn};

use crate::config::{NodeConfig, ProfilerConfig, ServiceConfig};

/// First non-empty line of a byte buffer, lossily decoded and trimmed
fn first_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Queries the service manager for the service's current state.
///
/// Returns `None` when the manager cannot be queried at all (command
/// missing, non-zero exit); the caller surfaces that as an advisory
/// outcome, never a check failure.
pub fn service_state(cfg: &ServiceConfig) -> Option<String> {
    let result = Command::new(&cfg.manager_cmd)
        .args(["-H", "-o", "state", &cfg.name])
        .output();

    match result {
        Ok(out) if out.status.success() => {
            let state = first_line(&out.stdout);
            debug!(service = %cfg.name, state = %state, "service manager state");
            if state.is_empty() { None } else { Some(state) }
        }
        Ok(out) => {
            warn!(
                service = %cfg.name,
                status = %out.status,
                "service manager query returned failure"
            );
            None
        }
        Err(err) => {
            warn!(cmd = %cfg.manager_cmd, error = %err, "service manager unavailable");
            None
        }
    }
}

/// Asks the node control script for its version string.
///
/// A configured fixed version wins; otherwise `<control_cmd> version` is
/// invoked and its first output line returned. `None` means the version
/// could not be determined.
pub fn node_version(cfg: &NodeConfig) -> Option<String> {
    if let Some(version) = &cfg.version {
        return Some(version.clone());
    }

    match Command::new(&cfg.control_cmd).arg("version").output() {
        Ok(out) if out.status.success() => {
            let line = first_line(&out.stdout);
            if line.is_empty() { None } else { Some(line) }
        }
        Ok(out) => {
            warn!(cmd = %cfg.control_cmd, status = %out.status, "version query failed");
            None
        }
        Err(err) => {
            warn!(cmd = %cfg.control_cmd, error = %err, "version query unavailable");
            None
        }
    }
}

/// Runs the node's local ping under its service account.
///
/// The ping goes through `su` so the control script sees the same
/// environment as the running node. Success is the command exiting zero;
/// the first output line rides along for the operator.
pub fn node_ping(cfg: &NodeConfig) -> Result<String, String> {
    let shell_cmd = format!("{} ping", cfg.control_cmd);
    let result = Command::new("su")
        .args(["-", &cfg.user, "-c", &shell_cmd])
        .output();

    match result {
        Ok(out) if out.status.success() => Ok(first_line(&out.stdout)),
        Ok(out) => {
            let line = first_line(&out.stderr);
            let reason = if line.is_empty() {
                first_line(&out.stdout)
            } else {
                line
            };
            Err(format!(
                "local ping failed ({}): {}",
                out.status,
                if reason.is_empty() {
                    "no output"
                } else {
                    reason.as_str()
                }
            ))
        }
        Err(err) => Err(format!("could not invoke local ping via su: {}", err)),
    }
}

/// Outcome of a best-effort profiler capture
#[derive(Debug)]
pub enum ProfilerOutcome {
    /// Sampling completed; first lines of the capture
    Captured(Vec<String>),
    /// The profiler exists but the capture failed
    Failed(String),
    /// The profiler binary is not installed; the capture is skipped
    Unavailable,
}

/// Captures a profile sample of the given pid.
///
/// The configured command gets the sampling window and the pid appended.
/// An absent profiler is a skip, not an error.
pub fn run_profiler(cfg: &ProfilerConfig, pid: u32) -> ProfilerOutcome {
    let result = Command::new(&cfg.cmd)
        .arg(cfg.duration_secs.to_string())
        .arg(pid.to_string())
        .output();

    match result {
        Ok(out) if out.status.success() => {
            let lines = String::from_utf8_lossy(&out.stdout)
                .lines()
                .take(20)
                .map(|l| format!("  {}", l))
                .collect();
            ProfilerOutcome::Captured(lines)
        }
        Ok(out) => ProfilerOutcome::Failed(format!(
            "profiler exited with {}: {}",
            out.status,
            first_line(&out.stderr)
        )),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(cmd = %cfg.cmd, "profiler not installed");
            ProfilerOutcome::Unavailable
        }
        Err(err) => ProfilerOutcome::Failed(format!("could not start profiler: {}", err)),
    }
}
