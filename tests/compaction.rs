//! Compaction scan and remediation selection tests

use std::fs;
use std::path::Path;

use kv_doctor::config::RunMode;
use kv_doctor::health::CheckStatus;
use kv_doctor::health::checks::compaction::{
    COMPACTION_MARKER, diagnose, remediation_plan, scan_log_root,
};
use kv_doctor::version::VersionEra;

fn write_log(root: &Path, rel: &str, with_marker: bool) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    let content = if with_marker {
        format!("2026/07/30-02:11:04 ... {} : corruption at block 12\n", COMPACTION_MARKER)
    } else {
        "2026/07/30-02:11:04 compacting level 1\n".to_string()
    };
    fs::write(path, content).expect("write LOG");
}

#[test]
fn clean_root_scans_empty() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "12345/LOG", false);

    let report = scan_log_root(root.path()).expect("scan");
    assert!(report.affected_stores.is_empty());
    assert_eq!(report.hit_files, 0);
}

#[test]
fn affected_stores_collapse_per_store() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-a/LOG", true);
    write_log(root.path(), "store-a/archive/LOG", true);
    write_log(root.path(), "store-b/LOG", true);
    write_log(root.path(), "store-c/LOG", false);

    let report = scan_log_root(root.path()).expect("scan");
    assert_eq!(report.affected_stores, vec!["store-a", "store-b"]);
    assert_eq!(report.hit_files, 3);
}

#[test]
fn only_files_named_exactly_log_count() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-a/LOG.old", true);
    write_log(root.path(), "store-a/log", true);

    let report = scan_log_root(root.path()).expect("scan");
    assert_eq!(report.hit_files, 0);
}

#[test]
fn scanning_twice_yields_identical_results() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-b/LOG", true);
    write_log(root.path(), "store-a/LOG", true);

    let first = diagnose(root.path(), Some("1.2.0"), RunMode::Interactive);
    let second = diagnose(root.path(), Some("1.2.0"), RunMode::Interactive);
    assert_eq!(first.status, second.status);
    assert_eq!(first.message, second.message);
    assert_eq!(first.details, second.details);
}

#[test]
fn unreachable_root_is_unknown_not_clean() {
    let root = tempfile::tempdir().expect("tempdir");
    let missing = root.path().join("nope");

    let result = diagnose(&missing, None, RunMode::Monitoring);
    assert_eq!(result.status, CheckStatus::Unknown);
    assert!(result.message.contains("nope"));
}

#[test]
fn clean_tree_diagnoses_ok() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "12345/LOG", false);

    let result = diagnose(root.path(), None, RunMode::Monitoring);
    assert_eq!(result.status, CheckStatus::Ok);
    assert_eq!(result.message, "no compaction errors found");
}

#[test]
fn monitoring_mode_reports_only_the_count() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-a/LOG", true);
    write_log(root.path(), "store-b/LOG", true);

    let result = diagnose(root.path(), Some("1.2.0"), RunMode::Monitoring);
    assert_eq!(result.status, CheckStatus::Critical);
    assert!(result.message.contains("2 LOG file(s)"));
    assert!(result.details.is_empty());
}

#[test]
fn pre_1_2_gets_the_manual_repair_transcript() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-a/LOG", true);

    let result = diagnose(root.path(), Some("1.1.9"), RunMode::Interactive);
    assert_eq!(result.status, CheckStatus::Critical);
    let details = result.details.join("\n");
    assert!(details.contains("max_open_files"));
    assert!(details.contains("repair"));
    assert!(details.contains("store-a"));
}

#[test]
fn era_1_2_gets_one_repair_tool_invocation_per_store() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-a/LOG", true);
    write_log(root.path(), "store-b/LOG", true);

    let result = diagnose(root.path(), Some("1.2.0"), RunMode::Interactive);
    let details = result.details.join("\n");
    assert!(details.contains("stop the node"));
    assert!(details.contains("in parallel"));
    assert_eq!(details.matches("kv-store-repair").count(), 2);
}

#[test]
fn post_1_2_self_heals() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-a/LOG", true);

    let result = diagnose(root.path(), Some("1.3.1v1"), RunMode::Interactive);
    assert_eq!(result.status, CheckStatus::Critical);
    let details = result.details.join("\n");
    assert!(details.contains("automatically"));
    assert!(!details.contains("kv-store-repair"));
}

#[test]
fn unparseable_version_never_selects_a_strategy() {
    let root = tempfile::tempdir().expect("tempdir");
    write_log(root.path(), "store-a/LOG", true);

    for version in [None, Some("beta")] {
        let result = diagnose(root.path(), version, RunMode::Interactive);
        assert_eq!(result.status, CheckStatus::Critical);
        let details = result.details.join("\n");
        assert!(details.contains("no remediation selected"));
        assert!(!details.contains("max_open_files"));
        assert!(!details.contains("kv-store-repair"));
    }
}

#[test]
fn remediation_plan_shapes() {
    let stores = vec!["a".to_string(), "b".to_string()];
    let root = Path::new("/var/db/kvnode/leveldb");

    let plan = remediation_plan(VersionEra::Era12, root, &stores);
    assert_eq!(plan.era, VersionEra::Era12);
    assert_eq!(plan.affected_stores, stores);
    // One header line plus one invocation per store
    assert_eq!(plan.commands.len(), 3);

    let plan = remediation_plan(VersionEra::Post12, root, &stores);
    assert!(plan.commands.iter().all(|c| !c.contains("repair ")));
}
