//! # Probe and Check Results
//!
//! [`ProbeOutcome`] is the tri-state result of one bounded connectivity probe.
//! [`CheckReport`] is what the check suite hands back to the terminal layer.

use std::fmt;
use std::time::Duration;

/// Result of a single bounded probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The remote acknowledged the session before the deadline.
    Acknowledged { next_valid_id: i64 },
    /// The deadline passed without acknowledgment or refusal.
    TimedOut,
    /// The remote refused (or dropped) the session during the wait.
    Unavailable { reason: String },
}

impl ProbeOutcome {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, ProbeOutcome::Acknowledged { .. })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Acknowledged { next_valid_id } => {
                write!(f, "acknowledged (next valid id {next_valid_id})")
            }
            ProbeOutcome::TimedOut => write!(f, "timed out"),
            ProbeOutcome::Unavailable { reason } => write!(f, "unavailable: {reason}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    /// The check could not run. Never counted as a failure.
    Skipped { reason: String },
}

/// One finished check, ready for printing.
#[derive(Clone, Debug)]
pub struct CheckReport {
    pub name: &'static str,
    pub status: CheckStatus,
    pub details: Vec<(String, String)>,
    pub elapsed: Duration,
}

impl CheckReport {
    pub fn new(name: &'static str, status: CheckStatus, elapsed: Duration) -> Self {
        Self { name, status, details: Vec::new(), elapsed }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    pub fn failed(&self) -> bool {
        self.status == CheckStatus::Failed
    }
}

/// True when no report failed. Skips are allowed.
pub fn all_passed(reports: &[CheckReport]) -> bool {
    reports.iter().all(|report| !report.failed())
}
