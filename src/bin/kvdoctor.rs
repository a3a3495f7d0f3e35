use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kv_doctor::config::{ConfigOverrides, DoctorConfig, RunMode};
use kv_doctor::health::{self, CheckKind, CheckStatus};

#[derive(Parser, Debug)]
#[command(
    name = "kvdoctor",
    version,
    about = "Health checks for a clustered key-value store node"
)]
struct Cli {
    /// Run a single check instead of the full battery
    #[arg(value_enum)]
    check: Option<CheckKind>,

    /// Terse one-line-per-check output with monitoring exit codes
    #[arg(short, long)]
    monitoring: bool,

    /// Run the extended battery (stats, profile, rss)
    #[arg(short, long)]
    all: bool,

    /// Configuration profile (default, production, ...)
    #[arg(long)]
    profile_name: Option<String>,

    /// Node HTTP host
    #[arg(long)]
    host: Option<String>,

    /// Node HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Resident-memory warning threshold in bytes
    #[arg(long)]
    rss_warn: Option<u64>,

    /// Resident-memory critical threshold in bytes
    #[arg(long)]
    rss_crit: Option<u64>,

    /// Service name registered with the service manager
    #[arg(long)]
    service: Option<String>,

    /// Storage engine log root directory
    #[arg(long)]
    log_root: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("kvdoctor: {:#}", err);
            process::exit(CheckStatus::Unknown.exit_code());
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let profile = cli
        .profile_name
        .clone()
        .or_else(|| std::env::var("DOCTOR_PROFILE").ok())
        .unwrap_or_else(|| "default".to_string());

    let overrides = ConfigOverrides {
        host: cli.host,
        port: cli.port,
        timeout_secs: cli.timeout,
        rss_warn_bytes: cli.rss_warn,
        rss_crit_bytes: cli.rss_crit,
        service_name: cli.service,
        log_root: cli.log_root,
        mode: Some(if cli.monitoring {
            RunMode::Monitoring
        } else {
            RunMode::Interactive
        }),
        all: Some(cli.all),
    };

    let config = DoctorConfig::load(&profile)
        .context("loading configuration")?
        .with_overrides(overrides);

    let code = match cli.check {
        Some(kind) => {
            // A single named check exits with its own status, advisory or
            // not; aggregation rules only apply to the battery.
            let report = health::run_single(&config, kind);
            report
                .outcomes
                .first()
                .map(|o| o.result.status.exit_code())
                .unwrap_or(0)
        }
        None => health::run(&config).exit_code(),
    };
    Ok(code)
}
