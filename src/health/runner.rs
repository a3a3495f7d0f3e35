//! Orchestration of the check battery

use std::time::Instant;

use clap::ValueEnum;

use crate::config::DoctorConfig;
use crate::health::check::{CheckResult, CheckStatus, SystemCheck};
use crate::health::checks::{
    CompactionCheck, ConfigDisplayCheck, HttpPingCheck, NodePingCheck, OkToStartCheck,
    ProcessCheck, ProfileCheck, RssCheck, ServiceCheck, SingletonCheck, StatsCheck,
    SystemInfoCheck,
};
use crate::health::reporter::Reporter;

/// A check name as selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    Process,
    Ping,
    #[value(name = "nodeping")]
    NodePing,
    Stats,
    Rss,
    Singleton,
    Compaction,
    Config,
    Service,
    System,
    #[value(name = "oktostart")]
    OkToStart,
    Profile,
}

/// One executed check, as recorded in the report
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: String,
    /// Advisory outcomes are rendered but excluded from aggregation
    pub advisory: bool,
    pub result: CheckResult,
}

/// Results from one run
#[derive(Debug, Default)]
pub struct HealthReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl HealthReport {
    /// Worst status across non-advisory outcomes; an empty report is Ok
    pub fn aggregate(&self) -> CheckStatus {
        self.outcomes
            .iter()
            .filter(|o| !o.advisory)
            .map(|o| o.result.status)
            .fold(CheckStatus::Ok, CheckStatus::worst)
    }

    /// Process exit code for the aggregated status
    pub fn exit_code(&self) -> i32 {
        self.aggregate().exit_code()
    }

    /// Returns true if nothing aggregated worse than Ok
    pub fn is_healthy(&self) -> bool {
        self.aggregate() == CheckStatus::Ok
    }

    /// Names of the executed checks, in execution order
    pub fn check_names(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.name.as_str()).collect()
    }
}

/// Decides which checks run, executes them in order, aggregates statuses
pub struct Orchestrator<'a> {
    config: &'a DoctorConfig,
    reporter: Reporter,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a DoctorConfig) -> Self {
        Self {
            config,
            reporter: Reporter::new(config.mode),
        }
    }

    /// Runs the full battery.
    ///
    /// Always: config display, service state (advisory), process. The
    /// liveness-dependent checks only run when the process is up; a down
    /// node gets the start-precondition diagnostic instead. The
    /// compaction scan always runs: stale logs are informative even when
    /// the node is down.
    pub fn run_battery(&self) -> HealthReport {
        let mut report = HealthReport::default();

        self.execute(&mut report, &ConfigDisplayCheck::new(self.config));
        self.execute(&mut report, &ServiceCheck::new(self.config));
        let process_up =
            self.execute(&mut report, &ProcessCheck::new(self.config)) == CheckStatus::Ok;

        if process_up {
            self.execute(&mut report, &SystemInfoCheck::new());
            self.execute(&mut report, &NodePingCheck::new(self.config));
            self.execute(&mut report, &HttpPingCheck::new(self.config));
            self.execute(&mut report, &SingletonCheck::new(self.config));
            if self.config.all {
                self.execute(&mut report, &StatsCheck::new(self.config));
                self.execute(&mut report, &ProfileCheck::new(self.config));
                self.execute(&mut report, &RssCheck::new(self.config));
            }
        } else {
            self.execute(&mut report, &OkToStartCheck::new(self.config));
        }

        self.execute(&mut report, &CompactionCheck::new(self.config));

        self.reporter.finish(&report, true);
        report
    }

    /// Runs exactly one named check; the exit code is that check's status
    pub fn run_single(&self, kind: CheckKind) -> HealthReport {
        let mut report = HealthReport::default();
        let check: Box<dyn SystemCheck + '_> = match kind {
            CheckKind::Process => Box::new(ProcessCheck::new(self.config)),
            CheckKind::Ping => Box::new(HttpPingCheck::new(self.config)),
            CheckKind::NodePing => Box::new(NodePingCheck::new(self.config)),
            CheckKind::Stats => Box::new(StatsCheck::new(self.config)),
            CheckKind::Rss => Box::new(RssCheck::new(self.config)),
            CheckKind::Singleton => Box::new(SingletonCheck::new(self.config)),
            CheckKind::Compaction => Box::new(CompactionCheck::new(self.config)),
            CheckKind::Config => Box::new(ConfigDisplayCheck::new(self.config)),
            CheckKind::Service => Box::new(ServiceCheck::new(self.config)),
            CheckKind::System => Box::new(SystemInfoCheck::new()),
            CheckKind::OkToStart => Box::new(OkToStartCheck::new(self.config)),
            CheckKind::Profile => Box::new(ProfileCheck::new(self.config)),
        };
        self.execute(&mut report, check.as_ref());
        self.reporter.finish(&report, false);
        report
    }

    /// Runs one check, records it, renders it, returns its status
    fn execute(&self, report: &mut HealthReport, check: &dyn SystemCheck) -> CheckStatus {
        self.reporter.check_start(check);

        let start = Instant::now();
        let result = check.check().with_duration(start.elapsed());
        let status = result.status;

        let outcome = CheckOutcome {
            name: check.name().to_string(),
            advisory: check.advisory(),
            result,
        };
        self.reporter.check_result(&outcome);
        report.outcomes.push(outcome);
        status
    }
}
