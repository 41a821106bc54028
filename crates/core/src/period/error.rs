//! Period resolution error types.

use chrono::NaiveDate;
use thiserror::Error;
use tally_shared::AppError;

/// Errors raised when a caller hands the engine a malformed period.
///
/// These are contract violations: they are surfaced to the caller and never
/// retried or silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Start date is after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A custom period is missing bounds and no fallback applies.
    #[error("Invalid period specification: {0}")]
    InvalidPeriodSpec(String),

    /// Range spans more days than the caller is allowed to fold.
    #[error("Date range spans {days} days, maximum is {max}")]
    RangeTooLong {
        /// Days in the requested range.
        days: i64,
        /// Configured maximum.
        max: u32,
    },

    /// Calendar arithmetic left chrono's representable range.
    #[error("Date out of supported range near {0}")]
    DateOutOfRange(NaiveDate),
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        Self::Validation(err.to_string())
    }
}
