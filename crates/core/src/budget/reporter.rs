//! Budget reports over the ledger collaborators.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::UserId;
use tracing::debug;

use super::error::BudgetError;
use super::service::BudgetService;
use super::types::{AlertList, BudgetAlert, BudgetDefinition, BudgetList, BudgetStatus, BudgetSummary};
use crate::aggregation::Aggregator;
use crate::ledger::{CategoryDirectory, CategoryLookup, EntryKind, LedgerFilter, LedgerQuery};
use crate::period::{DateRange, PeriodResolver};

/// Evaluates budgets against a user's ledger.
#[derive(Clone)]
pub struct BudgetReporter {
    ledger: Arc<dyn LedgerQuery>,
    categories: Arc<dyn CategoryLookup>,
}

impl BudgetReporter {
    /// Creates a reporter over the given collaborators.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerQuery>, categories: Arc<dyn CategoryLookup>) -> Self {
        Self { ledger, categories }
    }

    /// Status of one budget over its own period.
    ///
    /// # Errors
    ///
    /// Returns the `BudgetError` validation variants for a malformed
    /// definition, `BudgetError::Period` for reversed custom bounds and
    /// `BudgetError::Ledger` if the ledger query fails or yields a negative
    /// amount.
    pub async fn status(
        &self,
        user_id: UserId,
        budget: &BudgetDefinition,
        reference: NaiveDate,
    ) -> Result<BudgetStatus, BudgetError> {
        let range = PeriodResolver::resolve(&budget.period, reference)?;
        let mut status = self.evaluate_one(user_id, budget, range, reference).await?;

        let directory =
            CategoryDirectory::load(self.categories.as_ref(), budget.scope.category_id()).await;
        status.display = directory.display(status.category_id);
        Ok(status)
    }

    /// Statuses of every budget (active only unless `include_inactive`).
    ///
    /// # Errors
    ///
    /// Fails like [`BudgetReporter::status`].
    pub async fn list(
        &self,
        user_id: UserId,
        budgets: &[BudgetDefinition],
        include_inactive: bool,
        reference: NaiveDate,
    ) -> Result<BudgetList, BudgetError> {
        let selected = budgets.iter().filter(|b| include_inactive || b.is_active);
        let statuses = self.evaluate_all(user_id, selected, None, reference).await?;

        let total_planned: Decimal = statuses.iter().map(|s| s.planned).sum();
        let total_spent: Decimal = statuses.iter().map(|s| s.spent).sum();

        Ok(BudgetList {
            total: statuses.len(),
            budgets: statuses,
            total_planned,
            total_spent,
            total_remaining: total_planned - total_spent,
        })
    }

    /// Current-month summary of the active monthly budgets.
    ///
    /// # Errors
    ///
    /// Fails like [`BudgetReporter::status`].
    pub async fn summary(
        &self,
        user_id: UserId,
        budgets: &[BudgetDefinition],
        reference: NaiveDate,
    ) -> Result<BudgetSummary, BudgetError> {
        let month = DateRange::month_of(reference)?;
        let monthly = budgets.iter().filter(|b| b.is_active && b.is_monthly());
        let statuses = self.evaluate_all(user_id, monthly, Some(month), reference).await?;

        let total_budget: Decimal = statuses.iter().map(|s| s.planned).sum();
        let total_spent: Decimal = statuses.iter().map(|s| s.spent).sum();

        Ok(BudgetSummary {
            period_start: month.start(),
            period_end: month.end(),
            total_budget,
            total_spent,
            overall_usage_rate: BudgetService::usage_rate(total_spent, total_budget),
            alerts: statuses.iter().filter_map(BudgetAlert::from_status).collect(),
            category_budgets: statuses,
        })
    }

    /// Alerts for every active budget, each evaluated over its own period.
    ///
    /// # Errors
    ///
    /// Fails like [`BudgetReporter::status`].
    pub async fn alerts(
        &self,
        user_id: UserId,
        budgets: &[BudgetDefinition],
        reference: NaiveDate,
    ) -> Result<AlertList, BudgetError> {
        let active = budgets.iter().filter(|b| b.is_active);
        let statuses = self.evaluate_all(user_id, active, None, reference).await?;

        Ok(statuses
            .iter()
            .filter_map(BudgetAlert::from_status)
            .collect::<Vec<_>>()
            .into())
    }

    /// Sum of expenses in `range` within the budget's scope.
    async fn spent(
        &self,
        user_id: UserId,
        budget: &BudgetDefinition,
        range: DateRange,
    ) -> Result<Decimal, BudgetError> {
        let category = budget.scope.category_id();
        let mut filter = LedgerFilter::new().kind(EntryKind::Expense);
        if let Some(id) = category {
            filter = filter.category(id);
        }

        let entries = self.ledger.query(user_id, range, filter).await?;
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Aggregator::sum_of(&entries, EntryKind::Expense, category))
    }

    /// Evaluates one budget over `range`, without display fields.
    async fn evaluate_one(
        &self,
        user_id: UserId,
        budget: &BudgetDefinition,
        range: DateRange,
        reference: NaiveDate,
    ) -> Result<BudgetStatus, BudgetError> {
        budget.validate()?;
        let spent = self.spent(user_id, budget, range).await?;
        let status = BudgetService::evaluate(budget, &range, spent, reference);

        debug!(
            user_id = %user_id,
            budget_id = %budget.id,
            start = %range.start(),
            end = %range.end(),
            spent = %status.spent,
            usage_rate = %status.usage_rate,
            alert_level = ?status.alert_level,
            "Evaluated budget"
        );
        Ok(status)
    }

    /// Evaluates budgets in order, over `range` when given or their own
    /// period otherwise, then attaches category display fields.
    async fn evaluate_all<'a, I>(
        &self,
        user_id: UserId,
        budgets: I,
        range: Option<DateRange>,
        reference: NaiveDate,
    ) -> Result<Vec<BudgetStatus>, BudgetError>
    where
        I: IntoIterator<Item = &'a BudgetDefinition>,
    {
        let budgets: Vec<&BudgetDefinition> = budgets.into_iter().collect();
        let mut statuses = Vec::with_capacity(budgets.len());

        for budget in &budgets {
            let range = match range {
                Some(range) => range,
                None => PeriodResolver::resolve(&budget.period, reference)?,
            };
            statuses.push(self.evaluate_one(user_id, budget, range, reference).await?);
        }

        let directory = CategoryDirectory::load(
            self.categories.as_ref(),
            budgets.iter().filter_map(|b| b.scope.category_id()),
        )
        .await;
        for status in &mut statuses {
            status.display = directory.display(status.category_id);
        }

        Ok(statuses)
    }
}
