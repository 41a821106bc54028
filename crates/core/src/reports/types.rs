//! Report payload types.
//!
//! Money and percentages stay full-precision here and are rounded to two
//! places by the serializers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, ProjectId, round2, round2_opt};

use crate::aggregation::{AggregateBucket, CategoryShare, Totals};
use crate::ledger::{CategoryDisplay, EntryKind};
use crate::period::BucketKey;
use crate::trend::{CategorySetDiff, PeriodComparison, SeriesStats, TrendSeries};

/// Today and month-to-date figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Income recorded today.
    #[serde(serialize_with = "round2")]
    pub today_income: Decimal,
    /// Expense recorded today.
    #[serde(serialize_with = "round2")]
    pub today_expense: Decimal,
    /// Today's income minus expense.
    #[serde(serialize_with = "round2")]
    pub today_balance: Decimal,
    /// Income from the first of the month through today.
    #[serde(serialize_with = "round2")]
    pub month_income: Decimal,
    /// Expense from the first of the month through today.
    #[serde(serialize_with = "round2")]
    pub month_expense: Decimal,
    /// Month-to-date income minus expense.
    #[serde(serialize_with = "round2")]
    pub month_balance: Decimal,
    /// Overall usage of active monthly budgets, when any exist.
    #[serde(serialize_with = "round2_opt")]
    pub month_budget_usage: Option<Decimal>,
    /// Entries recorded in the recent window.
    pub recent_records_count: usize,
}

/// One day of a daily report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Income.
    #[serde(serialize_with = "round2")]
    pub income: Decimal,
    /// Expense.
    #[serde(serialize_with = "round2")]
    pub expense: Decimal,
    /// Income minus expense.
    #[serde(serialize_with = "round2")]
    pub balance: Decimal,
}

impl DailyPoint {
    /// Builds the point from a day bucket.
    #[must_use]
    pub fn new(date: NaiveDate, bucket: &AggregateBucket) -> Self {
        Self {
            date,
            income: bucket.income,
            expense: bucket.expense,
            balance: bucket.balance(),
        }
    }
}

/// Gap-filled daily figures for a month or a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReport {
    /// One point per day.
    pub stats: Vec<DailyPoint>,
    /// Income over the range.
    #[serde(serialize_with = "round2")]
    pub total_income: Decimal,
    /// Expense over the range.
    #[serde(serialize_with = "round2")]
    pub total_expense: Decimal,
    /// Number of days.
    pub total_days: usize,
}

/// One calendar month of figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    /// Year.
    pub year: i32,
    /// Month, 1..=12.
    pub month: u32,
    /// Income.
    #[serde(serialize_with = "round2")]
    pub income: Decimal,
    /// Expense.
    #[serde(serialize_with = "round2")]
    pub expense: Decimal,
    /// Income minus expense.
    #[serde(serialize_with = "round2")]
    pub balance: Decimal,
    /// Entries in the month.
    pub record_count: u64,
}

impl MonthlyPoint {
    /// Builds the point for `year`-`month` from its bucket.
    #[must_use]
    pub fn new(year: i32, month: u32, bucket: &AggregateBucket) -> Self {
        Self {
            year,
            month,
            income: bucket.income,
            expense: bucket.expense,
            balance: bucket.balance(),
            record_count: bucket.count,
        }
    }

    /// Builds the point from a month bucket; `None` for other granularities.
    #[must_use]
    pub fn from_bucket(bucket: &AggregateBucket) -> Option<Self> {
        match bucket.key {
            BucketKey::Month { year, month } => Some(Self::new(year, month, bucket)),
            BucketKey::Day(_) | BucketKey::Year(_) => None,
        }
    }
}

/// Twelve gap-filled months of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    /// One point per month.
    pub stats: Vec<MonthlyPoint>,
    /// Income over the year.
    #[serde(serialize_with = "round2")]
    pub total_income: Decimal,
    /// Expense over the year.
    #[serde(serialize_with = "round2")]
    pub total_expense: Decimal,
    /// Number of months.
    pub total_months: usize,
}

/// One row of a category report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    /// Category, `None` for uncategorized entries.
    pub category_id: Option<CategoryId>,
    /// Display fields, when the category resolved.
    #[serde(flatten)]
    pub display: Option<CategoryDisplay>,
    /// Sum of amounts.
    #[serde(serialize_with = "round2")]
    pub total_amount: Decimal,
    /// Share of the report total.
    #[serde(serialize_with = "round2")]
    pub percentage: Decimal,
    /// Number of entries.
    pub count: u64,
}

impl CategoryRow {
    /// Attaches display fields to a share.
    #[must_use]
    pub fn new(share: &CategoryShare, display: Option<CategoryDisplay>) -> Self {
        Self {
            category_id: share.category_id,
            display,
            total_amount: share.total,
            percentage: share.percentage,
            count: share.count,
        }
    }
}

/// Category breakdown, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    /// `income`, `expense`, or `both`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Sum over every row.
    #[serde(serialize_with = "round2")]
    pub total_amount: Decimal,
    /// Rows sorted by total descending, then category id ascending.
    pub categories: Vec<CategoryRow>,
}

/// Parameters of a daily trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRequest {
    /// Trend length when `start` is absent.
    pub days: u32,
    /// First day; defaults to `days - 1` days before `end`.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last day; defaults to today.
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// Plot income or expense only; balance when absent.
    #[serde(default)]
    pub kind: Option<EntryKind>,
    /// Restrict to one project.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

impl TrendRequest {
    /// A balance trend over the last `days` days.
    #[must_use]
    pub const fn last_days(days: u32) -> Self {
        Self {
            days,
            start: None,
            end: None,
            kind: None,
            project_id: None,
        }
    }

    /// Plots `kind` only.
    #[must_use]
    pub const fn of_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Uses an explicit range.
    #[must_use]
    pub const fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Restricts to one project.
    #[must_use]
    pub const fn for_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Daily trend with summary statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    /// `income`, `expense`, or `both`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// One point per day.
    pub trend: TrendSeries,
    /// Average, extrema and growth of the series.
    #[serde(flatten)]
    pub stats: SeriesStats,
}

/// Previous-year baseline of a yearly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearOverYear {
    /// The previous year.
    pub prev_year: i32,
    /// Previous year's income.
    #[serde(serialize_with = "round2")]
    pub prev_income: Decimal,
    /// Previous year's expense.
    #[serde(serialize_with = "round2")]
    pub prev_expense: Decimal,
    /// Change against the previous year.
    #[serde(flatten)]
    pub change: PeriodComparison,
}

/// Full-year statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyReport {
    /// Year.
    pub year: i32,
    /// Income over the year.
    #[serde(serialize_with = "round2")]
    pub total_income: Decimal,
    /// Expense over the year.
    #[serde(serialize_with = "round2")]
    pub total_expense: Decimal,
    /// Income minus expense.
    #[serde(serialize_with = "round2")]
    pub balance: Decimal,
    /// Entries in the year.
    pub record_count: u64,
    /// Month-by-month figures.
    pub monthly_stats: MonthlyReport,
    /// Both kinds by category.
    pub category_stats: CategoryReport,
    /// Comparison with the previous year.
    pub year_over_year: YearOverYear,
}

/// Category total within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Category, `None` for uncategorized entries.
    pub category_id: Option<CategoryId>,
    /// Sum of amounts.
    #[serde(serialize_with = "round2")]
    pub total: Decimal,
}

/// Per-kind category totals of one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindBreakdown {
    /// Income by category.
    pub income: Vec<CategoryTotal>,
    /// Expense by category.
    pub expense: Vec<CategoryTotal>,
}

/// One side of a month comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSnapshot {
    /// Year.
    pub year: i32,
    /// Month, 1..=12.
    pub month: u32,
    /// Income.
    #[serde(serialize_with = "round2")]
    pub income: Decimal,
    /// Expense.
    #[serde(serialize_with = "round2")]
    pub expense: Decimal,
    /// Income minus expense.
    #[serde(serialize_with = "round2")]
    pub balance: Decimal,
    /// Entries in the month.
    pub record_count: u64,
    /// Category totals by kind.
    pub category_breakdown: KindBreakdown,
}

impl MonthSnapshot {
    /// Income, expense and count of the snapshot.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        Totals {
            income: self.income,
            expense: self.expense,
            count: self.record_count,
        }
    }
}

/// Two months side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthComparison {
    /// Baseline month.
    pub period1: MonthSnapshot,
    /// Compared month.
    pub period2: MonthSnapshot,
    /// Change of `period2` against `period1`.
    pub comparison: PeriodComparison,
}

/// Expense categories of one comparison window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWindow {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
    /// Rows sorted by total descending.
    pub categories: Vec<CategoryRow>,
}

/// Expense categories of two windows and how the category set changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryComparison {
    /// Earlier window.
    pub baseline: CategoryWindow,
    /// Later window.
    pub current: CategoryWindow,
    /// Categories that appeared or vanished.
    #[serde(flatten)]
    pub diff: CategorySetDiff,
}
