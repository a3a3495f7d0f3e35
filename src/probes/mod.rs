//! External collaborators
//!
//! Everything the checks observe lives behind this module: the process
//! table, the node's HTTP interface, and the subprocesses the tool shells
//! out to (service manager, node control script, profiler). The checks
//! pass fully-formed arguments in and interpret exit status or text out;
//! none of the collaborators' internals are modeled here.

pub mod command;
pub mod http;
pub mod process;

pub use http::{ProbeError, get_text};
pub use process::{NodeProcess, find_node};
