//! Period-over-period comparisons.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, percent_change, round2_opt};

use crate::aggregation::{CategoryBreakdown, Totals};

/// Percentage change of a period against a baseline period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// Income change; absent when baseline income is 0.
    #[serde(serialize_with = "round2_opt")]
    pub income_change: Option<Decimal>,
    /// Expense change; absent when baseline expense is 0.
    #[serde(serialize_with = "round2_opt")]
    pub expense_change: Option<Decimal>,
}

impl PeriodComparison {
    /// Compares `current` against `baseline`.
    #[must_use]
    pub fn between(baseline: &Totals, current: &Totals) -> Self {
        Self {
            income_change: percent_change(baseline.income, current.income),
            expense_change: percent_change(baseline.expense, current.expense),
        }
    }
}

/// Categories that appeared or disappeared between two periods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySetDiff {
    /// Nonzero in the current period only.
    pub new_categories: BTreeSet<CategoryId>,
    /// Nonzero in the baseline period only.
    pub vanished_categories: BTreeSet<CategoryId>,
}

impl CategorySetDiff {
    /// Set differences over categories with nonzero totals.
    #[must_use]
    pub fn between(baseline: &CategoryBreakdown, current: &CategoryBreakdown) -> Self {
        let before: BTreeSet<CategoryId> = baseline.active_categories().collect();
        let after: BTreeSet<CategoryId> = current.active_categories().collect();

        Self {
            new_categories: after.difference(&before).copied().collect(),
            vanished_categories: before.difference(&after).copied().collect(),
        }
    }
}
