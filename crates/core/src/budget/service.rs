//! Budget evaluation: usage, projection and alert classification.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::percent_of;

use super::types::{AlertLevel, BudgetDefinition, BudgetStatus};
use crate::period::DateRange;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Evaluates `budget` given the expense total `spent` over `range`.
    ///
    /// `reference` is "today": it drives the remaining-days count and the
    /// linear projection. The result carries no display fields.
    #[must_use]
    pub fn evaluate(
        budget: &BudgetDefinition,
        range: &DateRange,
        spent: Decimal,
        reference: NaiveDate,
    ) -> BudgetStatus {
        let usage_rate = Self::usage_rate(spent, budget.amount);

        BudgetStatus {
            budget_id: budget.id,
            budget_name: budget.name.clone(),
            category_id: budget.scope.category_id(),
            display: None,
            period_start: range.start(),
            period_end: range.end(),
            planned: budget.amount,
            spent,
            remaining: budget.amount - spent,
            usage_rate,
            alert_level: Self::classify(spent, budget.amount, usage_rate, budget.alert_threshold),
            days_remaining: Self::days_remaining(range, reference),
            projected_spend: Self::projected_spend(range, spent, reference),
        }
    }

    /// `spent / amount * 100`, or 0 for a zero amount.
    #[must_use]
    pub fn usage_rate(spent: Decimal, amount: Decimal) -> Decimal {
        percent_of(spent, amount).unwrap_or(Decimal::ZERO)
    }

    /// Alert level. `Critical` depends only on `spent >= amount`, so it wins
    /// even when `usage_rate` sits below the threshold.
    #[must_use]
    pub fn classify(
        spent: Decimal,
        amount: Decimal,
        usage_rate: Decimal,
        threshold: Decimal,
    ) -> AlertLevel {
        let mut level = AlertLevel::Normal;
        if usage_rate >= threshold {
            level = AlertLevel::Warning;
        }
        if spent >= amount {
            level = AlertLevel::Critical;
        }
        level
    }

    /// Days from `reference` through the end of `range`, inclusive; 0 once past.
    #[must_use]
    pub fn days_remaining(range: &DateRange, reference: NaiveDate) -> i64 {
        ((range.end() - reference).num_days() + 1).max(0)
    }

    /// Period-end spend extrapolated from the daily average so far.
    ///
    /// Elapsed days count from the period start up to, not including,
    /// `reference`. Absent until a full day has elapsed.
    #[must_use]
    pub fn projected_spend(range: &DateRange, spent: Decimal, reference: NaiveDate) -> Option<Decimal> {
        if reference <= range.start() {
            return None;
        }
        let elapsed = (reference - range.start()).num_days();
        let daily_avg = spent / Decimal::from(elapsed);
        Some(daily_avg * Decimal::from(range.days()))
    }
}
