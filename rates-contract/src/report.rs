//! Per-case results and the suite summary.

use std::fmt;

use rates_types::Endpoint;
use serde::Serialize;

use crate::verify::Mismatch;

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    /// The service answered exactly as the oracle says.
    Passed,
    /// The service answered, but not as the oracle says.
    Failed { mismatches: Vec<Mismatch> },
    /// The harness could not complete the exchange.
    Errored { reason: String },
}

impl Verdict {
    pub fn from_mismatches(mismatches: Vec<Mismatch>) -> Self {
        if mismatches.is_empty() {
            Verdict::Passed
        } else {
            Verdict::Failed { mismatches }
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

/// Result of running one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub endpoint: Endpoint,
    #[serde(flatten)]
    pub verdict: Verdict,
    pub elapsed_ms: u64,
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.verdict {
            Verdict::Passed => "PASS",
            Verdict::Failed { .. } => "FAIL",
            Verdict::Errored { .. } => "ERROR",
        };
        write!(
            f,
            "{label:<5} {} ({}, {}ms)",
            self.name, self.endpoint, self.elapsed_ms
        )?;
        match &self.verdict {
            Verdict::Passed => Ok(()),
            Verdict::Failed { mismatches } => {
                for mismatch in mismatches {
                    write!(f, "\n      - {mismatch}")?;
                }
                Ok(())
            }
            Verdict::Errored { reason } => write!(f, "\n      - {reason}"),
        }
    }
}

/// Counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errored
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases: {} passed, {} failed, {} errored",
            self.total(),
            self.passed,
            self.failed,
            self.errored
        )
    }
}

/// All case results of one run, in the order the cases were given.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn summary(&self) -> Summary {
        self.cases
            .iter()
            .fold(Summary::default(), |mut summary, case| {
                match case.verdict {
                    Verdict::Passed => summary.passed += 1,
                    Verdict::Failed { .. } => summary.failed += 1,
                    Verdict::Errored { .. } => summary.errored += 1,
                }
                summary
            })
    }

    /// True when every case passed.
    pub fn is_success(&self) -> bool {
        self.cases.iter().all(|case| case.verdict.is_passed())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "summary": self.summary(),
            "cases": self.cases,
        })
    }
}
