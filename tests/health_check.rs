//! Integration tests for the check framework and orchestration

use std::time::Duration;

use kv_doctor::config::{DoctorConfig, RunMode};
use kv_doctor::health::runner::CheckOutcome;
use kv_doctor::health::{self, CheckResult, CheckStatus, HealthReport, monitoring_line};
use kv_doctor::health::checks::rss::classify_rss;

fn outcome(name: &str, advisory: bool, result: CheckResult) -> CheckOutcome {
    CheckOutcome {
        name: name.to_string(),
        advisory,
        result,
    }
}

#[test]
fn empty_report_aggregates_ok() {
    let report = HealthReport::default();
    assert_eq!(report.aggregate(), CheckStatus::Ok);
    assert_eq!(report.exit_code(), 0);
    assert!(report.is_healthy());
}

#[test]
fn aggregate_is_worst_status() {
    let report = HealthReport {
        outcomes: vec![
            outcome("a", false, CheckResult::ok("fine")),
            outcome("b", false, CheckResult::warning("meh")),
            outcome("c", false, CheckResult::ok("fine")),
        ],
    };
    assert_eq!(report.aggregate(), CheckStatus::Warning);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn unknown_outranks_warning_but_not_critical() {
    let report = HealthReport {
        outcomes: vec![
            outcome("a", false, CheckResult::warning("meh")),
            outcome("b", false, CheckResult::unknown("who knows")),
        ],
    };
    assert_eq!(report.aggregate(), CheckStatus::Unknown);
    assert_eq!(report.exit_code(), 3);

    let report = HealthReport {
        outcomes: vec![
            outcome("a", false, CheckResult::unknown("who knows")),
            outcome("b", false, CheckResult::critical("down")),
        ],
    };
    assert_eq!(report.aggregate(), CheckStatus::Critical);
    assert_eq!(report.exit_code(), 2);
}

#[test]
fn advisory_outcomes_never_aggregate() {
    let report = HealthReport {
        outcomes: vec![
            outcome("service", true, CheckResult::unknown("manager gone")),
            outcome("process", false, CheckResult::ok("running")),
        ],
    };
    assert_eq!(report.aggregate(), CheckStatus::Ok);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn exit_codes_follow_plugin_convention() {
    assert_eq!(CheckStatus::Ok.exit_code(), 0);
    assert_eq!(CheckStatus::Warning.exit_code(), 1);
    assert_eq!(CheckStatus::Critical.exit_code(), 2);
    assert_eq!(CheckStatus::Unknown.exit_code(), 3);
}

#[test]
fn severity_ordering() {
    assert!(CheckStatus::Ok.severity() < CheckStatus::Warning.severity());
    assert!(CheckStatus::Warning.severity() < CheckStatus::Unknown.severity());
    assert!(CheckStatus::Unknown.severity() < CheckStatus::Critical.severity());
    assert_eq!(
        CheckStatus::Warning.worst(CheckStatus::Unknown),
        CheckStatus::Unknown
    );
}

#[test]
fn monitoring_line_is_severity_prefixed() {
    let o = outcome("ping", false, CheckResult::critical("no /ping response"));
    assert_eq!(monitoring_line(&o), "critical: no /ping response");

    let o = outcome("compaction", false, CheckResult::ok("no compaction errors found"));
    assert_eq!(monitoring_line(&o), "ok: no compaction errors found");
}

#[test]
fn check_result_builders() {
    let result = CheckResult::warning("w")
        .with_details(vec!["  detail".to_string()])
        .with_duration(Duration::from_millis(5));
    assert_eq!(result.status, CheckStatus::Warning);
    assert_eq!(result.message, "w");
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.duration, Duration::from_millis(5));
}

#[test]
fn rss_thresholds_are_strictly_greater_than() {
    let warn = 1_000;
    let crit = 2_000;
    assert_eq!(classify_rss(warn, warn, crit), CheckStatus::Ok);
    assert_eq!(classify_rss(warn + 1, warn, crit), CheckStatus::Warning);
    assert_eq!(classify_rss(crit, warn, crit), CheckStatus::Warning);
    assert_eq!(classify_rss(crit + 1, warn, crit), CheckStatus::Critical);
}

/// With the node process absent, the battery is exactly {config, service,
/// process, oktostart, compaction} and the process failure fixes the exit
/// code at 2 no matter how the start-precondition check turns out.
#[test]
fn battery_for_a_stopped_node() {
    let storage = tempfile::tempdir().expect("tempdir");

    let mut config = DoctorConfig::default();
    config.mode = RunMode::Monitoring;
    config.node.process_name = "kvdoctor-no-such-process".to_string();
    config.node.control_cmd = "kvdoctor-no-such-cmd".to_string();
    config.service.manager_cmd = "kvdoctor-no-such-manager".to_string();
    config.storage.log_root = storage.path().to_path_buf();

    let report = health::run(&config);
    assert_eq!(
        report.check_names(),
        vec!["config", "service", "process", "oktostart", "compaction"]
    );
    assert_eq!(report.exit_code(), 2);

    let process = &report.outcomes[2];
    assert_eq!(process.result.status, CheckStatus::Critical);

    // The unreachable service manager shows up as advisory Unknown and
    // stays out of the aggregate.
    let service = &report.outcomes[1];
    assert!(service.advisory);
    assert_eq!(service.result.status, CheckStatus::Unknown);

    let compaction = &report.outcomes[4];
    assert_eq!(compaction.result.status, CheckStatus::Ok);
}
