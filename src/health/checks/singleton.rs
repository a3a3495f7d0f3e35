//! Cluster membership (singleton) check

use serde_json::Value;

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes;

/// Membership list field in /stats output
pub const RING_MEMBERS: &str = "ring_members";

/// Counts ring members in a /stats body.
///
/// Each failure stage gets its own message, but they all collapse to the
/// same Unknown status at the check level.
pub fn ring_member_count(body: &str) -> Result<usize, String> {
    let stats: Value = serde_json::from_str(body)
        .map_err(|err| format!("stats body is not valid JSON: {}", err))?;
    let members = stats
        .get(RING_MEMBERS)
        .ok_or_else(|| format!("stats body has no {:?} field", RING_MEMBERS))?;
    let list = members
        .as_array()
        .ok_or_else(|| format!("stats field {:?} is not a list", RING_MEMBERS))?;
    Ok(list.len())
}

/// Checks that this node is not a cluster of one
///
/// A ring of exactly one member means the node never joined its cluster,
/// which is a misconfiguration, not a degraded state. Any fetch or parse
/// failure is Unknown: membership could not be determined either way.
pub struct SingletonCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> SingletonCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for SingletonCheck<'_> {
    fn name(&self) -> &'static str {
        "singleton"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Counts ring members to catch a node that never joined its cluster")
    }

    fn check(&self) -> CheckResult {
        let body = match probes::get_text(&self.config.http, "/stats") {
            Ok(body) => body,
            Err(err) => {
                return CheckResult::unknown(format!("could not fetch /stats: {}", err));
            }
        };

        match ring_member_count(&body) {
            Ok(1) => CheckResult::critical(
                "node is the only ring member (cluster of one)".to_string(),
            ),
            // An empty ring is at least as misconfigured as a ring of one.
            Ok(0) => CheckResult::critical("ring membership list is empty".to_string()),
            Ok(n) => CheckResult::ok(format!("{} ring members", n)),
            Err(reason) => CheckResult::unknown(reason),
        }
    }
}
