//! Dashboard composition service.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tally_shared::StatisticsConfig;
use tally_shared::types::UserId;
use tracing::{debug, warn};

use super::types::{Dashboard, RecentRecord, TopCategory};
use crate::aggregation::{AggregateBucket, Aggregator};
use crate::budget::{BudgetDefinition, BudgetReporter};
use crate::ledger::{CategoryDirectory, CategoryLookup, EntryKind, LedgerFilter, LedgerQuery};
use crate::period::{BucketKey, DateRange, Granularity, PeriodError, first_day_of_month, shift_month};
use crate::reports::{MonthlyPoint, ReportError, ReportService, TrendRequest};

/// Maximum number of entries in the recent records section.
pub const RECENT_RECORDS_LIMIT: usize = 10;

/// Assembles dashboards from the report and budget services.
#[derive(Clone)]
pub struct DashboardComposer {
    reports: ReportService,
    budgets: BudgetReporter,
}

impl DashboardComposer {
    /// Creates a composer over the given collaborators.
    #[must_use]
    pub fn new(
        ledger: Arc<dyn LedgerQuery>,
        categories: Arc<dyn CategoryLookup>,
        config: StatisticsConfig,
    ) -> Self {
        Self {
            budgets: BudgetReporter::new(ledger.clone(), categories.clone()),
            reports: ReportService::new(ledger, categories, config),
        }
    }

    /// Builds every dashboard section for `user_id` as of `today`.
    ///
    /// `days` defaults to `dashboard_days`. A section whose ledger or
    /// category source fails is logged and rendered empty.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidRequest` when `days` is outside
    /// `1..=MAX_DASHBOARD_DAYS` or a budget definition is malformed, and
    /// `ReportError::Period` when a window cannot be resolved.
    pub async fn compose(
        &self,
        user_id: UserId,
        budgets: &[BudgetDefinition],
        days: Option<u32>,
        today: NaiveDate,
    ) -> Result<Dashboard, ReportError> {
        let config = self.reports.config();
        let days = days.unwrap_or(config.dashboard_days);
        if days == 0 || days > StatisticsConfig::MAX_DASHBOARD_DAYS {
            return Err(ReportError::InvalidRequest(format!(
                "days must be within 1..={}, got {days}",
                StatisticsConfig::MAX_DASHBOARD_DAYS
            )));
        }
        let window = DateRange::ending_on(today, days)?;

        let mut overview = degrade("overview", self.reports.overview(user_id, today).await)?;
        overview.month_budget_usage = degrade(
            "budget_usage",
            self.budgets
                .summary(user_id, budgets, today)
                .await
                .map(|summary| {
                    (!summary.category_budgets.is_empty()).then_some(summary.overall_usage_rate)
                })
                .map_err(ReportError::from),
        )?;

        let dashboard = Dashboard {
            days,
            overview,
            recent_records: degrade("recent_records", self.recent_records(user_id, window).await)?,
            top_income_categories: degrade(
                "top_income_categories",
                self.top_categories(user_id, window, EntryKind::Income).await,
            )?,
            top_expense_categories: degrade(
                "top_expense_categories",
                self.top_categories(user_id, window, EntryKind::Expense).await,
            )?,
            daily_trend: degrade(
                "daily_trend",
                self.reports
                    .trend(user_id, &TrendRequest::last_days(days), today)
                    .await
                    .map(|report| report.trend),
            )?,
            monthly_trend: degrade("monthly_trend", self.monthly_trend(user_id, today).await)?,
            budget_alerts: degrade(
                "budget_alerts",
                self.budgets
                    .alerts(user_id, budgets, today)
                    .await
                    .map(|list| list.alerts)
                    .map_err(ReportError::from),
            )?,
        };

        debug!(user_id = %user_id, days, today = %today, "Composed dashboard");
        Ok(dashboard)
    }

    async fn top_categories(
        &self,
        user_id: UserId,
        window: DateRange,
        kind: EntryKind,
    ) -> Result<Vec<TopCategory>, ReportError> {
        let report = self
            .reports
            .category_breakdown(user_id, window, LedgerFilter::new().kind(kind))
            .await?;
        Ok(report
            .categories
            .into_iter()
            .take(self.reports.config().top_categories)
            .map(TopCategory::from)
            .collect())
    }

    /// Latest entries first. Same-day entries order by kind, larger amount,
    /// then category id.
    async fn recent_records(
        &self,
        user_id: UserId,
        window: DateRange,
    ) -> Result<Vec<RecentRecord>, ReportError> {
        let mut entries = self.reports.fetch(user_id, window, LedgerFilter::new()).await?;
        entries.sort_by(|a, b| {
            b.occurred_on
                .cmp(&a.occurred_on)
                .then(a.kind.cmp(&b.kind))
                .then(b.amount.cmp(&a.amount))
                .then(a.category_id.cmp(&b.category_id))
        });
        entries.truncate(RECENT_RECORDS_LIMIT);

        let directory = CategoryDirectory::load(
            self.reports.categories(),
            entries.iter().filter_map(|e| e.category_id),
        )
        .await;

        Ok(entries
            .iter()
            .map(|entry| RecentRecord::new(entry, directory.display(entry.category_id)))
            .collect())
    }

    /// One point per calendar month, oldest first, ending with `today`'s month.
    async fn monthly_trend(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyPoint>, ReportError> {
        let months = self.reports.config().monthly_trend_months;
        let (year, month) = (today.year(), today.month());
        let offsets: Vec<i32> = (0..months).rev().map(|back| -back.cast_signed()).collect();

        let (first_year, first_month) = shift_month(year, month, offsets.first().copied().unwrap_or(0));
        let start = first_day_of_month(first_year, first_month)
            .ok_or(PeriodError::DateOutOfRange(today))?;
        let range = DateRange::new(start, DateRange::month_of(today)?.end())?;

        let entries = self.reports.fetch(user_id, range, LedgerFilter::new()).await?;
        let buckets = Aggregator::aggregate(&entries, Granularity::Month, Some(&range));

        Ok(offsets
            .into_iter()
            .map(|offset| {
                let (year, month) = shift_month(year, month, offset);
                let bucket = AggregateBucket::get_or_zero(&buckets, BucketKey::Month { year, month });
                MonthlyPoint::new(year, month, &bucket)
            })
            .collect())
    }
}

/// Keeps a section's value, or logs a collaborator failure and renders the
/// section empty.
///
/// Period and request errors are contract violations and propagate.
fn degrade<T: Default>(section: &'static str, result: Result<T, ReportError>) -> Result<T, ReportError> {
    match result {
        Err(ReportError::Ledger(e)) => {
            warn!(section, error = %e, "Dashboard section unavailable, rendering empty");
            Ok(T::default())
        }
        other => other,
    }
}
