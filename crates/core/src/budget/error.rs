//! Budget error types.

use rust_decimal::Decimal;
use tally_shared::AppError;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::period::PeriodError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget name is empty.
    #[error("Budget name cannot be empty")]
    EmptyName,

    /// Amount must be strictly positive.
    #[error("Budget amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Alert threshold must lie in 0..=100.
    #[error("Alert threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(Decimal),

    /// The budget period could not be resolved.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// The ledger store failed while summing spend.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::Period(e) => e.into(),
            BudgetError::Ledger(e) => e.into(),
            BudgetError::EmptyName
            | BudgetError::InvalidAmount(_)
            | BudgetError::InvalidThreshold(_) => Self::Validation(err.to_string()),
        }
    }
}
