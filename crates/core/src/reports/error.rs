//! Report error types.

use tally_shared::AppError;
use thiserror::Error;

use crate::budget::BudgetError;
use crate::ledger::LedgerError;
use crate::period::PeriodError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The requested period is malformed.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// The ledger store or category lookup failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A request parameter is out of bounds.
    #[error("Invalid report request: {0}")]
    InvalidRequest(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Period(e) => e.into(),
            ReportError::Ledger(e) => e.into(),
            ReportError::InvalidRequest(msg) => Self::Validation(msg),
        }
    }
}

impl From<BudgetError> for ReportError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::Period(e) => Self::Period(e),
            BudgetError::Ledger(e) => Self::Ledger(e),
            BudgetError::EmptyName
            | BudgetError::InvalidAmount(_)
            | BudgetError::InvalidThreshold(_) => Self::InvalidRequest(err.to_string()),
        }
    }
}
