//! Storage engine version parsing and remediation-era classification
//!
//! Version strings reported by the node carry arbitrary packaging suffixes
//! ("1.3.1v1", "1.2.0-p2"). Only the leading dotted-digit portion matters
//! here: the dots are removed and the remaining digits are read as one
//! base-10 integer, so "1.2.0" compares as 120 and "1.3.1" as 131.
//!
//! This is digit concatenation, not semantic versioning. Digit groups of
//! different widths misorder ("1.10" reads as 110, "1.9" as 19). The
//! remediation-era cutoffs below were chosen against this scheme's actual
//! output, so the behavior is kept exactly as-is.

use thiserror::Error;

/// Remediation era for storage compaction damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionEra {
    /// Before 1.2: repair is a manual storage-console session
    Pre12,
    /// The 1.2 line: a dedicated repair utility exists
    Era12,
    /// After 1.2: the engine repairs compaction damage itself
    Post12,
}

impl VersionEra {
    /// Human-readable era label for operator output
    pub fn label(&self) -> &'static str {
        match self {
            VersionEra::Pre12 => "pre-1.2",
            VersionEra::Era12 => "1.2",
            VersionEra::Post12 => "post-1.2",
        }
    }
}

/// Error parsing a node version string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("version string {0:?} does not start with a digit")]
    NoLeadingDigit(String),
    #[error("numeric portion of version string {0:?} is out of range")]
    OutOfRange(String),
}

/// A classified node version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeVersion {
    /// Digit-concatenation value of the leading dotted version
    pub numeric: u64,
    /// Remediation era this version falls into
    pub era: VersionEra,
}

impl NodeVersion {
    /// Parses a raw version string and classifies its remediation era.
    ///
    /// Trailing non-digit, non-dot content is stripped before parsing.
    /// A string with no leading digit is an error; callers must report
    /// that as an unknown version, never as the oldest era.
    pub fn classify(raw: &str) -> Result<Self, VersionError> {
        if !raw.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(VersionError::NoLeadingDigit(raw.to_string()));
        }

        let digits: String = raw
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .filter(char::is_ascii_digit)
            .collect();
        let numeric: u64 = digits
            .parse()
            .map_err(|_| VersionError::OutOfRange(raw.to_string()))?;

        // The prefix test for the 1.2 line runs second: "1.2.0" reads as
        // 120, fails the < 120 test, and lands in Era12 by prefix.
        let era = if numeric < 120 {
            VersionEra::Pre12
        } else if raw.starts_with("1.2") {
            VersionEra::Era12
        } else {
            VersionEra::Post12
        };

        Ok(Self { numeric, era })
    }
}
