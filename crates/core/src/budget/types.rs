//! Budget data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{BudgetId, CategoryId, round2, round2_opt};

use super::error::BudgetError;
use crate::ledger::CategoryDisplay;
use crate::period::{PeriodMode, PeriodSpec};

/// Default alert threshold, in percent.
pub const DEFAULT_ALERT_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// What spend a budget caps.
///
/// Serialized as a nullable `category_id`: `null` means the total budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<CategoryId>", into = "Option<CategoryId>")]
pub enum BudgetScope {
    /// Every expense counts.
    #[default]
    Total,
    /// Only expenses in this category count.
    Category(CategoryId),
}

impl BudgetScope {
    /// The scoped category, if any.
    #[must_use]
    pub const fn category_id(self) -> Option<CategoryId> {
        match self {
            Self::Total => None,
            Self::Category(id) => Some(id),
        }
    }
}

impl From<Option<CategoryId>> for BudgetScope {
    fn from(id: Option<CategoryId>) -> Self {
        id.map_or(Self::Total, Self::Category)
    }
}

impl From<BudgetScope> for Option<CategoryId> {
    fn from(scope: BudgetScope) -> Self {
        scope.category_id()
    }
}

/// A spending target set by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDefinition {
    /// Budget ID; a fresh one is assigned when absent.
    #[serde(default)]
    pub id: BudgetId,
    /// Budget name.
    pub name: String,
    /// Total or single-category scope.
    #[serde(rename = "category_id", default)]
    pub scope: BudgetScope,
    /// Target amount, strictly positive.
    pub amount: Decimal,
    /// Period the amount applies to.
    #[serde(default)]
    pub period: PeriodSpec,
    /// Usage percentage at which a warning is raised.
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: Decimal,
    /// Inactive budgets are skipped by summaries and alerts.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_alert_threshold() -> Decimal {
    DEFAULT_ALERT_THRESHOLD
}

const fn default_active() -> bool {
    true
}

impl BudgetDefinition {
    /// Creates an active monthly total budget with the default threshold.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            scope: BudgetScope::Total,
            amount,
            period: PeriodSpec::monthly(),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            is_active: true,
        }
    }

    /// Restricts the budget to one category.
    #[must_use]
    pub const fn for_category(mut self, category_id: CategoryId) -> Self {
        self.scope = BudgetScope::Category(category_id);
        self
    }

    /// Sets the period.
    #[must_use]
    pub const fn with_period(mut self, period: PeriodSpec) -> Self {
        self.period = period;
        self
    }

    /// Sets the alert threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.alert_threshold = threshold;
        self
    }

    /// Returns true for a budget that renews every calendar month.
    #[must_use]
    pub fn is_monthly(&self) -> bool {
        self.period.mode == PeriodMode::Monthly
    }

    /// Checks the definition's invariants.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::EmptyName`, `BudgetError::InvalidAmount` for a
    /// non-positive amount, or `BudgetError::InvalidThreshold` outside 0..=100.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.name.trim().is_empty() {
            return Err(BudgetError::EmptyName);
        }
        if self.amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(self.amount));
        }
        if self.alert_threshold < Decimal::ZERO || self.alert_threshold > Decimal::ONE_HUNDRED {
            return Err(BudgetError::InvalidThreshold(self.alert_threshold));
        }
        Ok(())
    }
}

/// Alert classification of a budget, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// Below the alert threshold.
    Normal,
    /// At or above the alert threshold.
    Warning,
    /// Spend reached or exceeded the amount.
    Critical,
}

/// Derived state of one budget at a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub budget_name: String,
    /// Scoped category, `None` for a total budget.
    pub category_id: Option<CategoryId>,
    /// Category display fields, when the category resolved.
    #[serde(flatten)]
    pub display: Option<CategoryDisplay>,
    /// First day of the evaluated period.
    pub period_start: NaiveDate,
    /// Last day of the evaluated period.
    pub period_end: NaiveDate,
    /// Budgeted amount.
    #[serde(serialize_with = "round2")]
    pub planned: Decimal,
    /// Expenses in the period.
    #[serde(serialize_with = "round2")]
    pub spent: Decimal,
    /// `planned - spent`; negative when overspent.
    #[serde(serialize_with = "round2")]
    pub remaining: Decimal,
    /// Spent as a percentage of planned.
    #[serde(serialize_with = "round2")]
    pub usage_rate: Decimal,
    /// Alert classification.
    pub alert_level: AlertLevel,
    /// Days left in the period, counting the reference day.
    pub days_remaining: i64,
    /// Linear projection of period-end spend.
    #[serde(rename = "projected_spending", serialize_with = "round2_opt")]
    pub projected_spend: Option<Decimal>,
}

/// Kind of budget alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Usage crossed the alert threshold.
    Threshold,
    /// Spend reached the budgeted amount.
    Exceeded,
}

/// A budget that needs the user's attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAlert {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub budget_name: String,
    /// Category name, when scoped and resolvable.
    pub category_name: Option<String>,
    /// Expenses in the period.
    #[serde(serialize_with = "round2")]
    pub current_spent: Decimal,
    /// Budgeted amount.
    #[serde(serialize_with = "round2")]
    pub budget_amount: Decimal,
    /// Spent as a percentage of planned.
    #[serde(serialize_with = "round2")]
    pub usage_rate: Decimal,
    /// Alert kind.
    pub alert_type: AlertType,
}

impl BudgetAlert {
    /// Builds an alert for a non-normal status.
    #[must_use]
    pub fn from_status(status: &BudgetStatus) -> Option<Self> {
        let alert_type = match status.alert_level {
            AlertLevel::Normal => return None,
            AlertLevel::Warning => AlertType::Threshold,
            AlertLevel::Critical => AlertType::Exceeded,
        };

        Some(Self {
            budget_id: status.budget_id,
            budget_name: status.budget_name.clone(),
            category_name: status.display.as_ref().map(|d| d.category_name.clone()),
            current_spent: status.spent,
            budget_amount: status.planned,
            usage_rate: status.usage_rate,
            alert_type,
        })
    }
}

/// Statuses of a set of budgets with their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetList {
    /// Number of budgets listed.
    pub total: usize,
    /// One status per budget, in input order.
    pub budgets: Vec<BudgetStatus>,
    /// Sum of planned amounts.
    #[serde(serialize_with = "round2")]
    pub total_planned: Decimal,
    /// Sum of spent amounts.
    #[serde(serialize_with = "round2")]
    pub total_spent: Decimal,
    /// `total_planned - total_spent`.
    #[serde(serialize_with = "round2")]
    pub total_remaining: Decimal,
}

/// Current-month summary over active monthly budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    /// First day of the month.
    pub period_start: NaiveDate,
    /// Last day of the month.
    pub period_end: NaiveDate,
    /// Sum of budgeted amounts.
    #[serde(serialize_with = "round2")]
    pub total_budget: Decimal,
    /// Sum of spent amounts.
    #[serde(serialize_with = "round2")]
    pub total_spent: Decimal,
    /// Spent as a percentage of budgeted; 0 with no budgets.
    #[serde(serialize_with = "round2")]
    pub overall_usage_rate: Decimal,
    /// Budgets in warning or critical state.
    pub alerts: Vec<BudgetAlert>,
    /// Every evaluated status.
    pub category_budgets: Vec<BudgetStatus>,
}

/// Alerts across all active budgets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertList {
    /// Alerts, in budget order.
    pub alerts: Vec<BudgetAlert>,
    /// Number of alerts.
    pub count: usize,
}

impl From<Vec<BudgetAlert>> for AlertList {
    fn from(alerts: Vec<BudgetAlert>) -> Self {
        Self {
            count: alerts.len(),
            alerts,
        }
    }
}
