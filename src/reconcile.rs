//! Final classification of a bloom verdict against exact logs.
//!
//! | bloom | exact logs        | outcome            |
//! |-------|-------------------|--------------------|
//! | false | anything          | `ConfirmedAbsent`  |
//! | true  | not fetched       | `Possible`         |
//! | true  | fetched, n > 0    | `ConfirmedPresent` |
//! | true  | fetched, n == 0   | `FalsePositive`    |
//! | true  | fetch failed      | `VerificationUnavailable` error |
use std::fmt;

use crate::error::{CheckError, SourceError};

/// Classification of a single check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerificationOutcome {
    /// The bloom ruled the candidates out.
    ConfirmedAbsent,
    /// The bloom matched and no exact fetch was made.
    Possible,
    /// The bloom matched and matching logs exist.
    ConfirmedPresent,
    /// The bloom matched but no log matches.
    FalsePositive,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ConfirmedAbsent => "confirmed absent",
            Self::Possible => "possible",
            Self::ConfirmedPresent => "confirmed present",
            Self::FalsePositive => "false positive",
        };
        f.write_str(s)
    }
}

/// Outcome plus the number of matching exact logs (0 when unverified).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verification {
    /// Final classification.
    pub outcome: VerificationOutcome,
    /// Matching logs seen during verification.
    pub matching_logs: usize,
}

/// Map a bloom verdict and optional exact logs onto an outcome.
///
/// `exact_logs` must already be filtered by the same predicate the bloom was
/// tested with. When `bloom_verdict` is false the logs are not inspected.
pub fn reconcile<T>(
    bloom_verdict: bool,
    exact_logs: Option<Result<Vec<T>, SourceError>>,
) -> Result<Verification, CheckError> {
    if !bloom_verdict {
        return Ok(Verification {
            outcome: VerificationOutcome::ConfirmedAbsent,
            matching_logs: 0,
        });
    }

    match exact_logs {
        None => Ok(Verification {
            outcome: VerificationOutcome::Possible,
            matching_logs: 0,
        }),
        Some(Err(source)) => Err(CheckError::VerificationUnavailable { source }),
        Some(Ok(logs)) if logs.is_empty() => Ok(Verification {
            outcome: VerificationOutcome::FalsePositive,
            matching_logs: 0,
        }),
        Some(Ok(logs)) => Ok(Verification {
            outcome: VerificationOutcome::ConfirmedPresent,
            matching_logs: logs.len(),
        }),
    }
}
