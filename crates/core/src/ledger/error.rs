//! Ledger collaborator error types.

use rust_decimal::Decimal;
use thiserror::Error;
use tally_shared::AppError;

/// Errors reported by the ledger store or category lookup.
///
/// The engine does not retry these; retry policy belongs to the I/O layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The store could not be reached.
    #[error("Ledger store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with an error.
    #[error("Ledger store error: {0}")]
    Backend(String),

    /// An entry violated the non-negative amount invariant.
    #[error("Entry amount cannot be negative: {0}")]
    NegativeAmount(Decimal),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NegativeAmount(_) => Self::Validation(err.to_string()),
            LedgerError::Unavailable(_) | LedgerError::Backend(_) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}
