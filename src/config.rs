//! Run configuration
//!
//! Built once at startup from layered sources (built-in defaults, config
//! files, environment, CLI overrides) and passed by reference to every
//! component. Nothing reads ambient process-wide state after this.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Output mode for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Multi-line operator output with headers and a summary table
    #[default]
    Interactive,
    /// One severity-prefixed line per check, plugin-style exit codes
    Monitoring,
}

/// HTTP probe endpoint and timeout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host the node's HTTP interface listens on
    pub host: String,
    /// Port the node's HTTP interface listens on
    pub port: u16,
    /// Per-request timeout in seconds; a timeout counts as a failed probe
    pub timeout_secs: u64,
}

/// Resident-memory thresholds, strictly-greater-than semantics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    /// Bytes above which resident memory is a warning
    pub warn_bytes: u64,
    /// Bytes above which resident memory is critical
    pub crit_bytes: u64,
}

/// The node process and its control script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Executable name to look for in the process table
    pub process_name: String,
    /// Control script invoked for `ping` and `version`
    pub control_cmd: String,
    /// Service account the local ping runs under
    pub user: String,
    /// Fixed version string; when set, the control script is never asked
    pub version: Option<String>,
}

/// Service-manager query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service-manager query command
    pub manager_cmd: String,
    /// Service name registered with the service manager
    pub name: String,
}

/// Storage engine layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one subdirectory per store, each with a LOG
    pub log_root: PathBuf,
}

/// Sampling profiler invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Profiler command; the node pid is appended as the last argument
    pub cmd: String,
    /// Sampling window in seconds
    pub duration_secs: u64,
}

/// Effective configuration for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorConfig {
    /// The active profile (default, production, etc.)
    pub profile: String,
    pub http: HttpConfig,
    pub rss: RssConfig,
    pub node: NodeConfig,
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub profiler: ProfilerConfig,
    /// Output mode, fixed for the run
    #[serde(default)]
    pub mode: RunMode,
    /// Whether the extended battery (stats, profile, rss) runs
    #[serde(default)]
    pub all: bool,
}

/// CLI-level overrides applied after file and environment sources
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub rss_warn_bytes: Option<u64>,
    pub rss_crit_bytes: Option<u64>,
    pub service_name: Option<String>,
    pub log_root: Option<PathBuf>,
    pub mode: Option<RunMode>,
    pub all: Option<bool>,
}

impl DoctorConfig {
    /// Loads configuration for the specified profile
    ///
    /// Sources are layered in order:
    /// 1. built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{profile}.toml (profile-specific overrides)
    /// 4. Environment variables with prefix DOCTOR_ (e.g. DOCTOR_HTTP__PORT=8098)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("http.host", "127.0.0.1")?
            .set_default("http.port", 8098i64)?
            .set_default("http.timeout_secs", 5i64)?
            .set_default("rss.warn_bytes", 2_147_483_648i64)?
            .set_default("rss.crit_bytes", 4_294_967_296i64)?
            .set_default("node.process_name", "kvnode")?
            .set_default("node.control_cmd", "kvnode")?
            .set_default("node.user", "kvnode")?
            .set_default("node.version", None::<String>)?
            .set_default("service.manager_cmd", "svcs")?
            .set_default("service.name", "kvnode")?
            .set_default("storage.log_root", "/var/db/kvnode/leveldb")?
            .set_default("profiler.cmd", "dtrace-profile")?
            .set_default("profiler.duration_secs", 10i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            // Use __ as separator for nested fields (e.g. DOCTOR_RSS__WARN_BYTES)
            .add_source(
                Environment::with_prefix("DOCTOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration using the DOCTOR_PROFILE environment variable,
    /// defaulting to "default" if not set
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("DOCTOR_PROFILE").unwrap_or_else(|_| "default".to_string());
        Self::load(&profile)
    }

    /// Applies CLI overrides, consuming and returning the configuration
    /// so the final value is frozen before any check sees it
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.http.host = host;
        }
        if let Some(port) = overrides.port {
            self.http.port = port;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.http.timeout_secs = timeout;
        }
        if let Some(warn) = overrides.rss_warn_bytes {
            self.rss.warn_bytes = warn;
        }
        if let Some(crit) = overrides.rss_crit_bytes {
            self.rss.crit_bytes = crit;
        }
        if let Some(name) = overrides.service_name {
            self.service.name = name;
        }
        if let Some(root) = overrides.log_root {
            self.storage.log_root = root;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(all) = overrides.all {
            self.all = all;
        }
        self
    }
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 8098,
                timeout_secs: 5,
            },
            rss: RssConfig {
                warn_bytes: 2_147_483_648,
                crit_bytes: 4_294_967_296,
            },
            node: NodeConfig {
                process_name: "kvnode".to_string(),
                control_cmd: "kvnode".to_string(),
                user: "kvnode".to_string(),
                version: None,
            },
            service: ServiceConfig {
                manager_cmd: "svcs".to_string(),
                name: "kvnode".to_string(),
            },
            storage: StorageConfig {
                log_root: PathBuf::from("/var/db/kvnode/leveldb"),
            },
            profiler: ProfilerConfig {
                cmd: "dtrace-profile".to_string(),
                duration_secs: 10,
            },
            mode: RunMode::Interactive,
            all: false,
        }
    }
}
