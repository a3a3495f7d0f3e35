//! Core health check trait and types

use std::time::Duration;

/// Status of a diagnostic check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed but something needs attention
    Warning,
    /// Check failed
    Critical,
    /// The check itself could not determine an answer
    Unknown,
}

impl CheckStatus {
    /// Aggregation rank: Ok < Warning < Unknown < Critical.
    ///
    /// Unknown outranks Warning so an unresolvable check can never read
    /// as healthy, while a hard Critical still dominates the run.
    pub fn severity(&self) -> u8 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Unknown => 2,
            CheckStatus::Critical => 3,
        }
    }

    /// Process exit code per the monitoring-plugin convention
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Critical => 2,
            CheckStatus::Unknown => 3,
        }
    }

    /// Lowercase severity word used as the monitoring-mode line prefix
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Warning => "warning",
            CheckStatus::Critical => "critical",
            CheckStatus::Unknown => "unknown",
        }
    }

    /// Returns true if the check passed (Ok or Warning)
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok | CheckStatus::Warning)
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            CheckStatus::Ok => "OK".green().to_string(),
            CheckStatus::Warning => "WARNING".yellow().to_string(),
            CheckStatus::Critical => "CRITICAL".red().to_string(),
            CheckStatus::Unknown => "UNKNOWN".magenta().to_string(),
        }
    }

    /// The more severe of two statuses under the aggregation rank
    pub fn worst(self, other: CheckStatus) -> CheckStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// Result of a diagnostic check
///
/// Immutable once produced: created by one check execution, consumed once
/// for aggregation and rendering.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// The status of the check
    pub status: CheckStatus,
    /// Terse single-line message; the whole story in monitoring mode
    pub message: String,
    /// Extra lines shown in interactive mode only
    pub details: Vec<String>,
    /// How long the check took
    pub duration: Duration,
}

impl CheckResult {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Creates a passing check result
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Ok, message)
    }

    /// Creates a warning check result
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warning, message)
    }

    /// Creates a critical check result
    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Critical, message)
    }

    /// Creates an unknown check result
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Unknown, message)
    }

    /// Adds detail lines to the result
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Sets the duration for this check
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Trait for node diagnostic checks
pub trait SystemCheck {
    /// Name of the check, as selectable on the command line
    fn name(&self) -> &'static str;

    /// Perform the check
    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }

    /// Advisory checks are rendered but never aggregated into the exit code
    fn advisory(&self) -> bool {
        false
    }
}
