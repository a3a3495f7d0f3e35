//! Storage compaction-error scan and remediation selection
//!
//! The storage engine keeps one directory per store under the log root,
//! each with a `LOG` file. A "Compaction error" line in any of them means
//! the background compactor hit corrupt data files. What an operator can
//! do about it depends entirely on the engine version's remediation era.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{DoctorConfig, RunMode};
use crate::health::check::{CheckResult, SystemCheck};
use crate::probes::command;
use crate::version::{NodeVersion, VersionEra};

/// Marker line the storage engine writes on a failed compaction
pub const COMPACTION_MARKER: &str = "Compaction error";

/// Error scanning the storage log root
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot enter log root {path}: {source}")]
    Unreachable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("storage log scan failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a scan of the log root found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Stores with at least one marked LOG file, first-seen order, deduped
    pub affected_stores: Vec<String>,
    /// Total LOG files containing the marker
    pub hit_files: usize,
}

/// Scans the log root for LOG files containing the compaction marker.
///
/// The store identifier is the immediate child directory of the root that
/// the LOG file sits under; several marked files under one store collapse
/// to a single entry.
pub fn scan_log_root(root: &Path) -> Result<ScanReport, ScanError> {
    root.read_dir().map_err(|source| ScanError::Unreachable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut affected_stores = Vec::new();
    let mut seen = HashSet::new();
    let mut hit_files = 0;

    // min_depth 2: a LOG directly under the root belongs to no store.
    for entry in WalkDir::new(root).min_depth(2).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name() != "LOG" {
            continue;
        }

        let bytes = fs::read(entry.path()).map_err(|source| ScanError::Read {
            path: entry.path().to_path_buf(),
            source,
        })?;
        if !String::from_utf8_lossy(&bytes).contains(COMPACTION_MARKER) {
            continue;
        }

        hit_files += 1;
        if let Ok(rel) = entry.path().strip_prefix(root) {
            if let Some(first) = rel.components().next() {
                let store = first.as_os_str().to_string_lossy().into_owned();
                if seen.insert(store.clone()) {
                    affected_stores.push(store);
                }
            }
        }
    }

    Ok(ScanReport {
        affected_stores,
        hit_files,
    })
}

/// Repair instructions selected for one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationPlan {
    pub era: VersionEra,
    pub affected_stores: Vec<String>,
    pub commands: Vec<String>,
}

struct RepairContext<'a> {
    log_root: &'a Path,
    stores: &'a [String],
}

type Strategy = fn(&RepairContext) -> Vec<String>;

/// One registration per era; adding an era means adding a variant and a
/// line here, not editing string comparisons scattered through the scan.
fn strategy(era: VersionEra) -> Strategy {
    match era {
        VersionEra::Pre12 => manual_repair_transcript,
        VersionEra::Era12 => repair_tool_invocations,
        VersionEra::Post12 => self_heal_notice,
    }
}

fn manual_repair_transcript(ctx: &RepairContext) -> Vec<String> {
    let mut lines = vec![
        "  stop the node, then repair from the storage console with:".to_string(),
        "    max_open_files = 2000".to_string(),
        "    block_size = 4096".to_string(),
        "    cache_size = 536870912".to_string(),
        "    sync = false".to_string(),
        format!("    data_root = {}", ctx.log_root.display()),
        "  then repair each affected store:".to_string(),
    ];
    for store in ctx.stores {
        lines.push(format!("    repair {}", ctx.log_root.join(store).display()));
    }
    lines
}

fn repair_tool_invocations(ctx: &RepairContext) -> Vec<String> {
    let mut lines = vec![
        "  stop the node before repairing; stores on separate disks may be repaired in parallel:"
            .to_string(),
    ];
    for store in ctx.stores {
        lines.push(format!(
            "    kv-store-repair {}",
            ctx.log_root.join(store).display()
        ));
    }
    lines
}

fn self_heal_notice(_ctx: &RepairContext) -> Vec<String> {
    vec![
        "  this release repairs compaction damage automatically at startup".to_string(),
        "  if errors persist across restarts, contact support with the affected LOG files"
            .to_string(),
    ]
}

/// Builds the repair instructions for an era and set of affected stores
pub fn remediation_plan(era: VersionEra, log_root: &Path, stores: &[String]) -> RemediationPlan {
    let commands = strategy(era)(&RepairContext { log_root, stores });
    RemediationPlan {
        era,
        affected_stores: stores.to_vec(),
        commands,
    }
}

/// Runs the full diagnosis against a log root.
///
/// Separated from the check wrapper so the whole decision path is a
/// function of (directory tree, version string, mode).
pub fn diagnose(root: &Path, version: Option<&str>, mode: RunMode) -> CheckResult {
    let scan = match scan_log_root(root) {
        Ok(scan) => scan,
        Err(err) => return CheckResult::unknown(err.to_string()),
    };

    if scan.hit_files == 0 {
        return CheckResult::ok("no compaction errors found");
    }

    let message = format!(
        "compaction errors in {} LOG file(s) across {} store(s)",
        scan.hit_files,
        scan.affected_stores.len()
    );
    if mode == RunMode::Monitoring {
        return CheckResult::critical(message);
    }

    let mut details = vec![format!(
        "  affected stores: {}",
        scan.affected_stores.join(", ")
    )];
    match version.map(NodeVersion::classify) {
        Some(Ok(v)) => {
            details.push(format!(
                "  node version {} classifies as {}",
                version.unwrap_or_default(),
                v.era.label()
            ));
            let plan = remediation_plan(v.era, root, &scan.affected_stores);
            details.extend(plan.commands);
        }
        Some(Err(err)) => {
            details.push(format!("  {}", err));
            details.push(
                "  no remediation selected; determine the engine version manually".to_string(),
            );
        }
        None => {
            details.push("  node version unavailable".to_string());
            details.push(
                "  no remediation selected; determine the engine version manually".to_string(),
            );
        }
    }

    CheckResult::critical(message).with_details(details)
}

/// Scans storage LOG files for compaction errors and selects a repair path
///
/// Runs regardless of process liveness: stale logs are informative even
/// when the node is down.
pub struct CompactionCheck<'a> {
    config: &'a DoctorConfig,
}

impl<'a> CompactionCheck<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self { config }
    }
}

impl SystemCheck for CompactionCheck<'_> {
    fn name(&self) -> &'static str {
        "compaction"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Scans storage LOG files for compaction errors")
    }

    fn check(&self) -> CheckResult {
        // The version only matters once errors are found, and only
        // interactively; asking up front keeps diagnose() a pure function.
        let version = match self.config.mode {
            RunMode::Monitoring => None,
            RunMode::Interactive => command::node_version(&self.config.node),
        };
        diagnose(
            &self.config.storage.log_root,
            version.as_deref(),
            self.config.mode,
        )
    }
}
