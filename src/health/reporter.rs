//! Rendering for check results
//!
//! Interactive mode is for people: a labeled header per check, detail
//! lines, and a closing summary table. Monitoring mode is for pollers:
//! exactly one severity-prefixed line per check, no color, no trailing
//! blank line.

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::config::RunMode;
use crate::health::check::SystemCheck;
use crate::health::runner::{CheckOutcome, HealthReport};

/// Formats the monitoring-mode line for one outcome
pub fn monitoring_line(outcome: &CheckOutcome) -> String {
    format!("{}: {}", outcome.result.status.label(), outcome.result.message)
}

/// Formats a health report as a summary table
pub fn format_summary(report: &HealthReport) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Check", "Status", "Duration", "Message"]);
    for outcome in &report.outcomes {
        let duration_str = format!("{:.2?}", outcome.result.duration);
        builder.push_record([
            outcome.name.as_str(),
            &outcome.result.status.as_colored_str(),
            &duration_str,
            &outcome.result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let aggregate = report.aggregate();
    format!(
        "{}\noverall: {}",
        table,
        aggregate.as_colored_str().bold()
    )
}

/// Mode-aware printer used by the orchestrator as checks run
pub struct Reporter {
    mode: RunMode,
}

impl Reporter {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    /// Prints the labeled header before a check's output
    pub fn check_start(&self, check: &dyn SystemCheck) {
        if self.mode != RunMode::Interactive {
            return;
        }
        match check.description() {
            Some(desc) => println!("{} - {}", check.name().bold(), desc),
            None => println!("{}", check.name().bold()),
        }
    }

    /// Prints one finished check
    pub fn check_result(&self, outcome: &CheckOutcome) {
        match self.mode {
            RunMode::Monitoring => println!("{}", monitoring_line(outcome)),
            RunMode::Interactive => {
                println!(
                    "  {}: {}",
                    outcome.result.status.as_colored_str(),
                    outcome.result.message
                );
                for line in &outcome.result.details {
                    println!("{}", line);
                }
            }
        }
    }

    /// Closes out the run; the summary table only follows a full battery
    pub fn finish(&self, report: &HealthReport, with_summary: bool) {
        if self.mode != RunMode::Interactive {
            return;
        }
        if with_summary {
            println!();
            println!("{}", format_summary(report));
        }
        println!();
    }
}
