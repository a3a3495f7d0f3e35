//! Remote HTTP ping check

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes;

/// Probes the node's /ping endpoint and expects the literal body "OK"
///
/// A timeout or empty response is Critical like any other wrong answer;
/// the node either answered correctly within the deadline or it did not.
pub struct HttpPingCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> HttpPingCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for HttpPingCheck<'_> {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Probes the /ping endpoint over HTTP")
    }

    fn check(&self) -> CheckResult {
        let http = &self.config.http;
        match probes::get_text(http, "/ping") {
            Ok(body) if body.trim_end() == "OK" => CheckResult::ok(format!(
                "{}:{} responds OK on /ping",
                http.host, http.port
            )),
            Ok(body) => {
                let shown: String = body.chars().take(40).collect();
                CheckResult::critical(format!("unexpected /ping response {:?}", shown))
            }
            Err(err) => CheckResult::critical(format!(
                "no /ping response within {}s: {}",
                http.timeout_secs, err
            )),
        }
    }
}
