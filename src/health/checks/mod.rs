//! Built-in diagnostic checks

pub mod compaction;
pub mod config_display;
pub mod http_ping;
pub mod node_ping;
pub mod ok_to_start;
pub mod process;
pub mod profile;
pub mod rss;
pub mod service;
pub mod singleton;
pub mod stats;
pub mod system_info;

pub use compaction::CompactionCheck;
pub use config_display::ConfigDisplayCheck;
pub use http_ping::HttpPingCheck;
pub use node_ping::NodePingCheck;
pub use ok_to_start::OkToStartCheck;
pub use process::ProcessCheck;
pub use profile::ProfileCheck;
pub use rss::RssCheck;
pub use service::ServiceCheck;
pub use singleton::SingletonCheck;
pub use stats::StatsCheck;
pub use system_info::SystemInfoCheck;
