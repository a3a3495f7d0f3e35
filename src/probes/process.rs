//! Process-table query for the node process

use std::ffi::OsStr;

use sysinfo::System;
use tracing::debug;

/// A running node process observed in the process table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeProcess {
    pub pid: u32,
    /// Resident set size in bytes
    pub rss_bytes: u64,
}

/// Looks up the node process by exact executable name.
///
/// When several processes share the name (workers, beam schedulers seen
/// as one executable), the one holding the most resident memory is taken
/// as the node itself.
pub fn find_node(process_name: &str) -> Option<NodeProcess> {
    let mut sys = System::new_all();
    sys.refresh_all();

    let found = sys
        .processes_by_exact_name(OsStr::new(process_name))
        .map(|p| NodeProcess {
            pid: p.pid().as_u32(),
            rss_bytes: p.memory(),
        })
        .max_by_key(|p| p.rss_bytes);

    match &found {
        Some(p) => debug!(pid = p.pid, rss_bytes = p.rss_bytes, "node process found"),
        None => debug!(process_name, "no node process in process table"),
    }
    found
}
