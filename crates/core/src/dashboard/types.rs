//! Dashboard payload types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::{CategoryId, round2};

use crate::budget::BudgetAlert;
use crate::ledger::{CategoryDisplay, EntryKind, MoneyEntry};
use crate::reports::{CategoryRow, MonthlyPoint, Overview};
use crate::trend::TrendSeries;

/// One of the largest categories of a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCategory {
    /// Category, `None` for uncategorized entries.
    pub category_id: Option<CategoryId>,
    /// Category name, when resolved.
    pub category_name: Option<String>,
    /// Category icon, when resolved.
    pub icon: Option<String>,
    /// Sum of amounts.
    #[serde(serialize_with = "round2")]
    pub amount: Decimal,
    /// Share of the kind's total.
    #[serde(serialize_with = "round2")]
    pub percentage: Decimal,
}

impl From<CategoryRow> for TopCategory {
    fn from(row: CategoryRow) -> Self {
        let (category_name, icon) = match row.display {
            Some(display) => (Some(display.category_name), display.category_icon),
            None => (None, None),
        };
        Self {
            category_id: row.category_id,
            category_name,
            icon,
            amount: row.total_amount,
            percentage: row.percentage,
        }
    }
}

/// A recent ledger entry with its category display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentRecord {
    /// Amount.
    #[serde(serialize_with = "round2")]
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Category, if the entry was categorized.
    pub category_id: Option<CategoryId>,
    /// Category name, when resolved.
    pub category_name: Option<String>,
    /// Category icon, when resolved.
    pub category_icon: Option<String>,
    /// Day of the entry.
    pub record_date: NaiveDate,
}

impl RecentRecord {
    /// Attaches display fields to an entry.
    #[must_use]
    pub fn new(entry: &MoneyEntry, display: Option<CategoryDisplay>) -> Self {
        let (category_name, category_icon) = match display {
            Some(display) => (Some(display.category_name), display.category_icon),
            None => (None, None),
        };
        Self {
            amount: entry.amount,
            kind: entry.kind,
            category_id: entry.category_id,
            category_name,
            category_icon,
            record_date: entry.occurred_on,
        }
    }
}

/// Everything shown on the dashboard.
///
/// Sections whose data source failed are empty rather than absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Days covered by the category, record and daily trend sections.
    pub days: u32,
    /// Today and month-to-date figures.
    pub overview: Overview,
    /// Latest entries of the window, newest first.
    pub recent_records: Vec<RecentRecord>,
    /// Largest income categories of the window.
    pub top_income_categories: Vec<TopCategory>,
    /// Largest expense categories of the window.
    pub top_expense_categories: Vec<TopCategory>,
    /// Daily balance of the window.
    pub daily_trend: TrendSeries,
    /// Rolling calendar months ending with the current one.
    pub monthly_trend: Vec<MonthlyPoint>,
    /// Active budgets at or past their threshold.
    pub budget_alerts: Vec<BudgetAlert>,
}
