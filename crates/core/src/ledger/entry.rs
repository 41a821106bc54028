//! Money entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, ProjectId};

use super::error::LedgerError;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl EntryKind {
    /// Wire label (`income` / `expense`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// A single dated income or expense record.
///
/// `amount` is never negative; direction is carried by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyEntry {
    /// Non-negative amount.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// Category, if the entry was categorized.
    pub category_id: Option<CategoryId>,
    /// Project, if the entry belongs to one.
    pub project_id: Option<ProjectId>,
    /// Calendar day the movement happened.
    pub occurred_on: NaiveDate,
}

impl MoneyEntry {
    /// Creates an uncategorized entry.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NegativeAmount` if `amount` is below zero.
    pub fn new(amount: Decimal, kind: EntryKind, occurred_on: NaiveDate) -> Result<Self, LedgerError> {
        let entry = Self {
            amount,
            kind,
            category_id: None,
            project_id: None,
            occurred_on,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Checks the non-negative amount invariant.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NegativeAmount` if `amount` is below zero.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(LedgerError::NegativeAmount(self.amount));
        }
        Ok(())
    }

    /// Returns the signed amount (positive for income, negative for expense).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}
