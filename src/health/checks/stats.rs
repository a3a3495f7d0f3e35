//! Stats endpoint check

use serde_json::Value;

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes;

/// Counter that must be present and non-empty in /stats output
pub const STATS_COUNTER: &str = "node_gets";

/// Extracts the counter field from a /stats body.
///
/// Any failure mode (unparseable body, absent field, empty value) is the
/// same answer for this check: the counter is not usably present.
pub fn counter_value(body: &str) -> Result<String, String> {
    let stats: Value = serde_json::from_str(body)
        .map_err(|err| format!("stats body is not valid JSON: {}", err))?;
    match stats.get(STATS_COUNTER) {
        None | Some(Value::Null) => Err(format!("stats field {:?} is missing", STATS_COUNTER)),
        Some(Value::String(s)) if s.is_empty() => {
            Err(format!("stats field {:?} is empty", STATS_COUNTER))
        }
        Some(value) => Ok(value.to_string()),
    }
}

/// Probes /stats and verifies the expected counter field is present
pub struct StatsCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> StatsCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for StatsCheck<'_> {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Fetches /stats and verifies the request counter is reported")
    }

    fn check(&self) -> CheckResult {
        let http = &self.config.http;
        let body = match probes::get_text(http, "/stats") {
            Ok(body) => body,
            Err(err) => {
                return CheckResult::critical(format!(
                    "no /stats response within {}s: {}",
                    http.timeout_secs, err
                ));
            }
        };

        match counter_value(&body) {
            Ok(value) => CheckResult::ok(format!("{} = {}", STATS_COUNTER, value)),
            Err(reason) => CheckResult::critical(reason),
        }
    }
}
