//! Report subcommands.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tally_core::budget::BudgetReporter;
use tally_core::dashboard::DashboardComposer;
use tally_core::ledger::{EntryKind, InMemoryLedger, LedgerFilter};
use tally_core::period::DateRange;
use tally_core::reports::{ReportService, TrendRequest};
use tally_shared::StatisticsConfig;
use tally_shared::types::ProjectId;

use crate::snapshot::UserSnapshot;

/// Entry kind accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Income entries.
    Income,
    /// Expense entries.
    Expense,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => Self::Income,
            KindArg::Expense => Self::Expense,
        }
    }
}

/// Reports that can be printed.
#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Today and month-to-date figures
    Overview,

    /// Every dashboard section
    Dashboard {
        /// Days covered by the category and trend sections
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Gap-filled daily figures of a month or a year
    Daily {
        /// Year
        year: i32,
        /// Month (1-12); the whole year when omitted
        month: Option<u32>,
    },

    /// Twelve months of a year
    Monthly {
        /// Year
        year: i32,
    },

    /// Full-year statistics with year-over-year change
    Yearly {
        /// Year
        year: i32,
    },

    /// Category shares over a date range
    Categories {
        /// First day (YYYY-MM-DD)
        #[arg(short, long)]
        start: NaiveDate,
        /// Last day (YYYY-MM-DD)
        #[arg(short, long)]
        end: NaiveDate,
        /// Restrict to one kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Daily trend with summary statistics
    Trend {
        /// Trend length in days
        #[arg(short, long)]
        days: Option<u32>,
        /// First day (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<NaiveDate>,
        /// Plot one kind instead of the balance
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Restrict to one project
        #[arg(short, long)]
        project: Option<ProjectId>,
    },

    /// Two calendar months side by side
    CompareMonths {
        /// Baseline year
        year1: i32,
        /// Baseline month
        month1: u32,
        /// Compared year
        year2: i32,
        /// Compared month
        month2: u32,
    },

    /// Expense categories of the current and previous window
    CompareCategories,

    /// Status of every budget
    Budgets {
        /// Include inactive budgets
        #[arg(long)]
        include_inactive: bool,
    },

    /// Monthly budget summary for the current month
    BudgetSummary,

    /// Budgets at or past their threshold
    Alerts,
}

/// Services over one snapshot ledger.
pub struct Runner {
    reports: ReportService,
    budgets: BudgetReporter,
    dashboard: DashboardComposer,
}

impl Runner {
    /// Wires every service to `ledger`.
    pub fn new(ledger: InMemoryLedger, config: StatisticsConfig) -> Self {
        let ledger = Arc::new(ledger);
        Self {
            reports: ReportService::new(ledger.clone(), ledger.clone(), config.clone()),
            budgets: BudgetReporter::new(ledger.clone(), ledger.clone()),
            dashboard: DashboardComposer::new(ledger.clone(), ledger, config),
        }
    }

    /// Runs `command` for `user` as of `today` and returns its payload.
    pub async fn run(
        &self,
        command: ReportCommand,
        user: &UserSnapshot,
        today: NaiveDate,
    ) -> anyhow::Result<Value> {
        let user_id = user.user_id;
        match command {
            ReportCommand::Overview => to_value(self.reports.overview(user_id, today).await?),
            ReportCommand::Dashboard { days } => to_value(
                self.dashboard
                    .compose(user_id, &user.budgets, days, today)
                    .await?,
            ),
            ReportCommand::Daily { year, month } => {
                to_value(self.reports.daily(user_id, year, month).await?)
            }
            ReportCommand::Monthly { year } => to_value(self.reports.monthly(user_id, year).await?),
            ReportCommand::Yearly { year } => to_value(self.reports.yearly(user_id, year).await?),
            ReportCommand::Categories { start, end, kind } => {
                let filter = LedgerFilter::new().maybe_kind(kind.map(EntryKind::from));
                to_value(
                    self.reports
                        .category_breakdown(user_id, DateRange::new(start, end)?, filter)
                        .await?,
                )
            }
            ReportCommand::Trend {
                days,
                start,
                end,
                kind,
                project,
            } => {
                let mut request =
                    TrendRequest::last_days(days.unwrap_or(self.reports.config().trend_default_days));
                request.start = start;
                request.end = end;
                if let Some(kind) = kind {
                    request = request.of_kind(kind.into());
                }
                if let Some(project) = project {
                    request = request.for_project(project);
                }
                to_value(self.reports.trend(user_id, &request, today).await?)
            }
            ReportCommand::CompareMonths {
                year1,
                month1,
                year2,
                month2,
            } => to_value(
                self.reports
                    .compare_months(user_id, (year1, month1), (year2, month2))
                    .await?,
            ),
            ReportCommand::CompareCategories => to_value(
                self.reports
                    .compare_categories(user_id, None, None, today)
                    .await?,
            ),
            ReportCommand::Budgets { include_inactive } => to_value(
                self.budgets
                    .list(user_id, &user.budgets, include_inactive, today)
                    .await?,
            ),
            ReportCommand::BudgetSummary => {
                to_value(self.budgets.summary(user_id, &user.budgets, today).await?)
            }
            ReportCommand::Alerts => {
                to_value(self.budgets.alerts(user_id, &user.budgets, today).await?)
            }
        }
    }
}

fn to_value<T: Serialize>(payload: T) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(payload)?)
}
