//! Report generation service.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tally_shared::StatisticsConfig;
use tally_shared::types::UserId;
use tracing::debug;

use super::error::ReportError;
use super::types::{
    CategoryComparison, CategoryReport, CategoryRow, CategoryTotal, CategoryWindow, DailyPoint,
    DailyReport, KindBreakdown, MonthComparison, MonthSnapshot, MonthlyPoint, MonthlyReport,
    Overview, TrendReport, TrendRequest, YearOverYear, YearlyReport,
};
use crate::aggregation::{Aggregator, CategoryBreakdown};
use crate::ledger::{
    CategoryDirectory, CategoryLookup, EntryKind, LedgerFilter, LedgerQuery, MoneyEntry,
};
use crate::period::{DateRange, Granularity, PeriodError};
use crate::trend::{CategorySetDiff, PeriodComparison, SeriesMetric, SeriesStats, TrendEngine};

/// Produces statistics reports from the ledger collaborators.
#[derive(Clone)]
pub struct ReportService {
    ledger: Arc<dyn LedgerQuery>,
    categories: Arc<dyn CategoryLookup>,
    config: StatisticsConfig,
}

impl ReportService {
    /// Creates a service over the given collaborators.
    #[must_use]
    pub fn new(
        ledger: Arc<dyn LedgerQuery>,
        categories: Arc<dyn CategoryLookup>,
        config: StatisticsConfig,
    ) -> Self {
        Self {
            ledger,
            categories,
            config,
        }
    }

    /// Windows and limits in effect.
    #[must_use]
    pub const fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    /// Today's and month-to-date figures plus the recent entry count.
    ///
    /// `month_budget_usage` is left absent; the dashboard fills it in.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if the ledger query fails.
    pub async fn overview(&self, user_id: UserId, today: NaiveDate) -> Result<Overview, ReportError> {
        let month = DateRange::new(DateRange::month_of(today)?.start(), today)?;
        let entries = self.fetch(user_id, month, LedgerFilter::new()).await?;

        let month_totals = Aggregator::totals(&entries);
        let todays: Vec<MoneyEntry> =
            entries.into_iter().filter(|e| e.occurred_on == today).collect();
        let today_totals = Aggregator::totals(&todays);

        let recent = self.recent_window(today)?;
        let recent_records_count = self.ledger.count(user_id, recent, LedgerFilter::new()).await?;

        Ok(Overview {
            today_income: today_totals.income,
            today_expense: today_totals.expense,
            today_balance: today_totals.balance(),
            month_income: month_totals.income,
            month_expense: month_totals.expense,
            month_balance: month_totals.balance(),
            month_budget_usage: None,
            recent_records_count,
        })
    }

    /// Gap-filled daily figures for `year`-`month`, or the whole year.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Period` for a month outside 1..=12 and
    /// `ReportError::Ledger` if the ledger query fails.
    pub async fn daily(
        &self,
        user_id: UserId,
        year: i32,
        month: Option<u32>,
    ) -> Result<DailyReport, ReportError> {
        let range = match month {
            Some(month) => DateRange::month(year, month)?,
            None => DateRange::year(year)?,
        };
        let entries = self.fetch(user_id, range, LedgerFilter::new()).await?;
        Ok(Self::daily_from(&entries, &range))
    }

    /// Twelve gap-filled months of `year`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if the ledger query fails.
    pub async fn monthly(&self, user_id: UserId, year: i32) -> Result<MonthlyReport, ReportError> {
        let range = DateRange::year(year)?;
        let entries = self.fetch(user_id, range, LedgerFilter::new()).await?;
        Ok(Self::monthly_from(&entries, &range))
    }

    /// Totals, monthly and category distribution of `year`, compared with
    /// the previous year.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if the ledger query fails.
    pub async fn yearly(&self, user_id: UserId, year: i32) -> Result<YearlyReport, ReportError> {
        let range = DateRange::year(year)?;
        let entries = self.fetch(user_id, range, LedgerFilter::new()).await?;
        let totals = Aggregator::totals(&entries);

        let prev_range = DateRange::year(year - 1)?;
        let prev_entries = self.fetch(user_id, prev_range, LedgerFilter::new()).await?;
        let prev_totals = Aggregator::totals(&prev_entries);

        Ok(YearlyReport {
            year,
            total_income: totals.income,
            total_expense: totals.expense,
            balance: totals.balance(),
            record_count: totals.count,
            monthly_stats: Self::monthly_from(&entries, &range),
            category_stats: self
                .category_report(Aggregator::by_category(&entries, None), None)
                .await,
            year_over_year: YearOverYear {
                prev_year: year - 1,
                prev_income: prev_totals.income,
                prev_expense: prev_totals.expense,
                change: PeriodComparison::between(&prev_totals, &totals),
            },
        })
    }

    /// Category shares over `range`, restricted by `filter`.
    ///
    /// The report kind follows `filter.kind`; without one both kinds are
    /// summed together.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Ledger` if the ledger query fails.
    pub async fn category_breakdown(
        &self,
        user_id: UserId,
        range: DateRange,
        filter: LedgerFilter,
    ) -> Result<CategoryReport, ReportError> {
        let entries = self.fetch(user_id, range, filter).await?;
        let breakdown = Aggregator::by_category(&entries, filter.kind);
        Ok(self.category_report(breakdown, filter.kind).await)
    }

    /// Daily trend with average, extrema and split-half growth.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidRequest` when `days` is outside
    /// `1..=trend_max_days`, `ReportError::Period` for a reversed or overlong
    /// range, and `ReportError::Ledger` if the ledger query fails.
    pub async fn trend(
        &self,
        user_id: UserId,
        request: &TrendRequest,
        today: NaiveDate,
    ) -> Result<TrendReport, ReportError> {
        if request.days == 0 || request.days > self.config.trend_max_days {
            return Err(ReportError::InvalidRequest(format!(
                "days must be within 1..={}, got {}",
                self.config.trend_max_days, request.days
            )));
        }

        let end = request.end.unwrap_or(today);
        let range = match request.start {
            Some(start) => DateRange::new(start, end)?,
            None => DateRange::ending_on(end, request.days)?,
        };
        range.ensure_at_most(self.config.max_range_days)?;

        let mut filter = LedgerFilter::new().maybe_kind(request.kind);
        if let Some(project_id) = request.project_id {
            filter = filter.project(project_id);
        }
        let entries = self.fetch(user_id, range, filter).await?;

        let metric = SeriesMetric::for_kind(request.kind);
        let trend = TrendEngine::series_from_entries(&entries, &range, Granularity::Day, metric);
        let stats = SeriesStats::of(&trend.values());

        Ok(TrendReport {
            kind: metric.label(),
            trend,
            stats,
        })
    }

    /// Side-by-side figures of two calendar months.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Period` for a month outside 1..=12 and
    /// `ReportError::Ledger` if the ledger query fails.
    pub async fn compare_months(
        &self,
        user_id: UserId,
        first: (i32, u32),
        second: (i32, u32),
    ) -> Result<MonthComparison, ReportError> {
        let period1 = self.month_snapshot(user_id, first.0, first.1).await?;
        let period2 = self.month_snapshot(user_id, second.0, second.1).await?;
        let comparison = PeriodComparison::between(&period1.totals(), &period2.totals());

        Ok(MonthComparison {
            period1,
            period2,
            comparison,
        })
    }

    /// Expense categories of a baseline and a current window.
    ///
    /// Without explicit windows, `current` covers the last
    /// `compare_window_days` days through today and `baseline` the same
    /// number of days immediately before it.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Period` if a default window leaves the calendar
    /// and `ReportError::Ledger` if the ledger query fails.
    pub async fn compare_categories(
        &self,
        user_id: UserId,
        baseline: Option<DateRange>,
        current: Option<DateRange>,
        today: NaiveDate,
    ) -> Result<CategoryComparison, ReportError> {
        let window = self.config.compare_window_days;
        let current = match current {
            Some(range) => range,
            None => DateRange::ending_on(today, window + 1)?,
        };
        let baseline = match baseline {
            Some(range) => range,
            None => {
                let end = current
                    .start()
                    .pred_opt()
                    .ok_or(PeriodError::DateOutOfRange(current.start()))?;
                DateRange::ending_on(end, window + 1)?
            }
        };

        let expenses = LedgerFilter::new().kind(EntryKind::Expense);
        let before = Aggregator::by_category(
            &self.fetch(user_id, baseline, expenses).await?,
            Some(EntryKind::Expense),
        );
        let after = Aggregator::by_category(
            &self.fetch(user_id, current, expenses).await?,
            Some(EntryKind::Expense),
        );
        let diff = CategorySetDiff::between(&before, &after);

        Ok(CategoryComparison {
            baseline: CategoryWindow {
                start: baseline.start(),
                end: baseline.end(),
                categories: self.category_report(before, Some(EntryKind::Expense)).await.categories,
            },
            current: CategoryWindow {
                start: current.start(),
                end: current.end(),
                categories: self.category_report(after, Some(EntryKind::Expense)).await.categories,
            },
            diff,
        })
    }

    /// The recent-activity window: `recent_window_days` days back through today.
    pub(crate) fn recent_window(&self, today: NaiveDate) -> Result<DateRange, ReportError> {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(self.config.recent_window_days)))
            .ok_or(PeriodError::DateOutOfRange(today))?;
        Ok(DateRange::new(start, today)?)
    }

    pub(crate) fn categories(&self) -> &dyn CategoryLookup {
        self.categories.as_ref()
    }

    /// Queries the ledger, rejects negative amounts and logs the result size.
    pub(crate) async fn fetch(
        &self,
        user_id: UserId,
        range: DateRange,
        filter: LedgerFilter,
    ) -> Result<Vec<MoneyEntry>, ReportError> {
        let entries = self.ledger.query(user_id, range, filter).await?;
        for entry in &entries {
            entry.validate()?;
        }
        debug!(
            user_id = %user_id,
            start = %range.start(),
            end = %range.end(),
            entries = entries.len(),
            "Fetched ledger entries"
        );
        Ok(entries)
    }

    /// Enriches a breakdown with category display fields.
    pub(crate) async fn category_report(
        &self,
        breakdown: CategoryBreakdown,
        kind: Option<EntryKind>,
    ) -> CategoryReport {
        let directory = CategoryDirectory::load(
            self.categories.as_ref(),
            breakdown.shares.iter().filter_map(|s| s.category_id),
        )
        .await;

        CategoryReport {
            kind: SeriesMetric::for_kind(kind).label(),
            total_amount: breakdown.total,
            categories: breakdown
                .shares
                .iter()
                .map(|share| CategoryRow::new(share, directory.display(share.category_id)))
                .collect(),
        }
    }

    async fn month_snapshot(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
    ) -> Result<MonthSnapshot, ReportError> {
        let range = DateRange::month(year, month)?;
        let entries = self.fetch(user_id, range, LedgerFilter::new()).await?;
        let totals = Aggregator::totals(&entries);

        let by_kind = |kind: EntryKind| -> Vec<CategoryTotal> {
            Aggregator::category_totals(&entries, Some(kind))
                .into_iter()
                .map(|(category_id, (total, _))| CategoryTotal { category_id, total })
                .collect()
        };

        Ok(MonthSnapshot {
            year,
            month,
            income: totals.income,
            expense: totals.expense,
            balance: totals.balance(),
            record_count: totals.count,
            category_breakdown: KindBreakdown {
                income: by_kind(EntryKind::Income),
                expense: by_kind(EntryKind::Expense),
            },
        })
    }

    fn daily_from(entries: &[MoneyEntry], range: &DateRange) -> DailyReport {
        let buckets = Aggregator::aggregate(entries, Granularity::Day, Some(range));
        let stats: Vec<DailyPoint> = TrendEngine::fill_buckets(&buckets, range, Granularity::Day)
            .iter()
            .filter_map(|bucket| bucket.key.start_date().map(|date| DailyPoint::new(date, bucket)))
            .collect();

        DailyReport {
            total_income: stats.iter().map(|s| s.income).sum(),
            total_expense: stats.iter().map(|s| s.expense).sum(),
            total_days: stats.len(),
            stats,
        }
    }

    fn monthly_from(entries: &[MoneyEntry], range: &DateRange) -> MonthlyReport {
        let buckets = Aggregator::aggregate(entries, Granularity::Month, Some(range));
        let stats: Vec<MonthlyPoint> = TrendEngine::fill_buckets(&buckets, range, Granularity::Month)
            .iter()
            .filter_map(MonthlyPoint::from_bucket)
            .collect();

        MonthlyReport {
            total_income: stats.iter().map(|s| s.income).sum::<Decimal>(),
            total_expense: stats.iter().map(|s| s.expense).sum::<Decimal>(),
            total_months: stats.len(),
            stats,
        }
    }
}
