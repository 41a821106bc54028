//! Tests for dashboard composition.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_shared::StatisticsConfig;
use tally_shared::types::{CategoryId, UserId};
use uuid::Uuid;

use super::composer::DashboardComposer;
use crate::budget::{AlertType, BudgetDefinition};
use crate::ledger::{
    CategoryInfo, EntryKind, InMemoryLedger, LedgerError, LedgerFilter, LedgerQuery, MoneyEntry,
};
use crate::period::{DateRange, PeriodSpec};
use crate::reports::ReportError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn category(n: u128) -> CategoryId {
    CategoryId::from_uuid(Uuid::from_u128(n))
}

fn entry(amount: Decimal, kind: EntryKind, on: NaiveDate, category_id: Option<u128>) -> MoneyEntry {
    let entry = MoneyEntry::new(amount, kind, on).unwrap();
    match category_id {
        Some(n) => entry.with_category(category(n)),
        None => entry,
    }
}

fn today() -> NaiveDate {
    date(2024, 2, 10)
}

fn seeded(user: UserId) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    for (n, name, kind) in [
        (1, "Salary", EntryKind::Income),
        (2, "Food", EntryKind::Expense),
        (3, "Rent", EntryKind::Expense),
    ] {
        ledger.add_category(CategoryInfo {
            id: category(n),
            name: name.to_string(),
            icon: None,
            parent_id: None,
            kind,
        });
    }
    ledger
        .extend(
            user,
            [
                entry(dec!(1000), EntryKind::Income, date(2024, 2, 5), Some(1)),
                entry(dec!(300), EntryKind::Expense, date(2024, 2, 6), Some(3)),
                entry(dec!(50), EntryKind::Expense, date(2024, 2, 8), None),
                entry(dec!(100), EntryKind::Expense, date(2024, 2, 10), Some(2)),
                entry(dec!(40), EntryKind::Expense, date(2024, 1, 20), Some(2)),
                entry(dec!(500), EntryKind::Income, date(2023, 9, 15), Some(1)),
                entry(dec!(999), EntryKind::Expense, date(2023, 8, 31), Some(2)),
            ],
        )
        .unwrap();
    ledger
}

fn composer(ledger: InMemoryLedger, config: StatisticsConfig) -> DashboardComposer {
    let ledger = Arc::new(ledger);
    DashboardComposer::new(ledger.clone(), ledger, config)
}

#[tokio::test]
async fn test_compose_fills_every_section() {
    let user = UserId::new();
    let composer = composer(seeded(user), StatisticsConfig::default());
    let budgets = [BudgetDefinition::new("Monthly", dec!(500))];

    let dashboard = composer.compose(user, &budgets, None, today()).await.unwrap();

    assert_eq!(dashboard.days, 7);
    assert_eq!(dashboard.overview.month_income, dec!(1000));
    assert_eq!(dashboard.overview.month_expense, dec!(450));
    assert_eq!(dashboard.overview.month_budget_usage, Some(dec!(90)));

    let income_names: Vec<_> = dashboard
        .top_income_categories
        .iter()
        .map(|c| c.category_name.as_deref())
        .collect();
    assert_eq!(income_names, vec![Some("Salary")]);
    assert_eq!(dashboard.top_income_categories[0].percentage, dec!(100));

    let expense_amounts: Vec<Decimal> =
        dashboard.top_expense_categories.iter().map(|c| c.amount).collect();
    assert_eq!(expense_amounts, vec![dec!(300), dec!(100), dec!(50)]);
    assert_eq!(dashboard.top_expense_categories[2].category_id, None);

    let record_dates: Vec<NaiveDate> =
        dashboard.recent_records.iter().map(|r| r.record_date).collect();
    assert_eq!(
        record_dates,
        vec![date(2024, 2, 10), date(2024, 2, 8), date(2024, 2, 6), date(2024, 2, 5)]
    );
    assert_eq!(dashboard.recent_records[0].category_name.as_deref(), Some("Food"));

    assert_eq!(dashboard.daily_trend.len(), 7);
    assert_eq!(dashboard.daily_trend.points()[0].date, date(2024, 2, 4));
    assert_eq!(dashboard.daily_trend.values().iter().sum::<Decimal>(), dec!(550));

    assert_eq!(dashboard.budget_alerts.len(), 1);
    assert_eq!(dashboard.budget_alerts[0].alert_type, AlertType::Threshold);
}

#[tokio::test]
async fn test_monthly_trend_wraps_year_boundary() {
    let user = UserId::new();
    let composer = composer(seeded(user), StatisticsConfig::default());

    let dashboard = composer.compose(user, &[], None, today()).await.unwrap();

    let months: Vec<(i32, u32)> =
        dashboard.monthly_trend.iter().map(|p| (p.year, p.month)).collect();
    assert_eq!(
        months,
        vec![(2023, 9), (2023, 10), (2023, 11), (2023, 12), (2024, 1), (2024, 2)]
    );
    assert_eq!(dashboard.monthly_trend[0].income, dec!(500));
    assert_eq!(dashboard.monthly_trend[1].record_count, 0);
    assert_eq!(dashboard.monthly_trend[4].expense, dec!(40));
    assert_eq!(dashboard.monthly_trend[5].balance, dec!(550));
}

#[tokio::test]
async fn test_top_categories_truncated_to_config() {
    let user = UserId::new();
    let config = StatisticsConfig {
        top_categories: 2,
        ..StatisticsConfig::default()
    };
    let composer = composer(seeded(user), config);

    let dashboard = composer.compose(user, &[], Some(30), today()).await.unwrap();

    assert_eq!(dashboard.top_expense_categories.len(), 2);
    assert_eq!(dashboard.top_expense_categories[0].category_name.as_deref(), Some("Rent"));
    // Jan 20 food spending falls inside the 30-day window
    assert_eq!(dashboard.top_expense_categories[1].amount, dec!(140));
    assert_eq!(dashboard.daily_trend.len(), 30);
}

#[tokio::test]
async fn test_without_monthly_budgets_usage_is_absent() {
    let user = UserId::new();
    let composer = composer(seeded(user), StatisticsConfig::default());
    let yearly = BudgetDefinition::new("Yearly", dec!(100)).with_period(PeriodSpec::yearly());

    let dashboard = composer.compose(user, &[yearly], None, today()).await.unwrap();

    assert_eq!(dashboard.overview.month_budget_usage, None);
    // 490 spent in 2024 against 100
    assert_eq!(dashboard.budget_alerts.len(), 1);
    assert_eq!(dashboard.budget_alerts[0].alert_type, AlertType::Exceeded);
}

#[tokio::test]
async fn test_days_out_of_bounds_rejected() {
    let user = UserId::new();
    let composer = composer(seeded(user), StatisticsConfig::default());

    for days in [0, 31] {
        let err = composer.compose(user, &[], Some(days), today()).await.unwrap_err();
        assert!(matches!(err, ReportError::InvalidRequest(_)));
    }
}

#[tokio::test]
async fn test_reversed_budget_period_propagates() {
    let user = UserId::new();
    let composer = composer(seeded(user), StatisticsConfig::default());
    let broken = BudgetDefinition::new("Broken", dec!(10))
        .with_period(PeriodSpec::custom(date(2024, 2, 9), date(2024, 2, 1)));

    let err = composer.compose(user, &[broken], None, today()).await.unwrap_err();

    assert!(matches!(err, ReportError::Period(_)));
}

#[tokio::test]
async fn test_malformed_budget_propagates() {
    let user = UserId::new();
    let composer = composer(seeded(user), StatisticsConfig::default());
    let zero = BudgetDefinition::new("Zero", Decimal::ZERO);

    let err = composer.compose(user, &[zero], None, today()).await.unwrap_err();

    assert!(matches!(err, ReportError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_same_day_records_have_stable_order() {
    let user = UserId::new();
    let mut ledger = InMemoryLedger::new();
    let day = date(2024, 2, 9);
    ledger
        .extend(
            user,
            [
                entry(dec!(5), EntryKind::Expense, day, Some(3)),
                entry(dec!(80), EntryKind::Expense, day, Some(2)),
                entry(dec!(5), EntryKind::Expense, day, Some(2)),
                entry(dec!(20), EntryKind::Income, day, None),
            ],
        )
        .unwrap();
    let composer = composer(ledger, StatisticsConfig::default());

    let dashboard = composer.compose(user, &[], None, today()).await.unwrap();

    let order: Vec<(EntryKind, Decimal, Option<CategoryId>)> = dashboard
        .recent_records
        .iter()
        .map(|r| (r.kind, r.amount, r.category_id))
        .collect();
    assert_eq!(
        order,
        vec![
            (EntryKind::Income, dec!(20), None),
            (EntryKind::Expense, dec!(80), Some(category(2))),
            (EntryKind::Expense, dec!(5), Some(category(2))),
            (EntryKind::Expense, dec!(5), Some(category(3))),
        ]
    );
}

struct OfflineLedger;

#[async_trait]
impl LedgerQuery for OfflineLedger {
    async fn query(
        &self,
        _user_id: UserId,
        _range: DateRange,
        _filter: LedgerFilter,
    ) -> Result<Vec<MoneyEntry>, LedgerError> {
        Err(LedgerError::Backend("timeout".to_string()))
    }
}

#[tokio::test]
async fn test_failing_ledger_renders_empty_sections() {
    let composer = DashboardComposer::new(
        Arc::new(OfflineLedger),
        Arc::new(InMemoryLedger::new()),
        StatisticsConfig::default(),
    );
    let budgets = [BudgetDefinition::new("Monthly", dec!(500))];

    let dashboard = composer
        .compose(UserId::new(), &budgets, None, today())
        .await
        .unwrap();

    assert_eq!(dashboard.overview.month_income, Decimal::ZERO);
    assert_eq!(dashboard.overview.month_budget_usage, None);
    assert!(dashboard.recent_records.is_empty());
    assert!(dashboard.top_income_categories.is_empty());
    assert!(dashboard.top_expense_categories.is_empty());
    assert!(dashboard.daily_trend.is_empty());
    assert!(dashboard.monthly_trend.is_empty());
    assert!(dashboard.budget_alerts.is_empty());
}

#[tokio::test]
async fn test_dashboard_serializes_rounded_sections() {
    let user = UserId::new();
    let composer = composer(seeded(user), StatisticsConfig::default());
    let budgets = [BudgetDefinition::new("Monthly", dec!(500))];

    let dashboard = composer.compose(user, &budgets, None, today()).await.unwrap();
    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["overview"]["month_budget_usage"], "90.00");
    assert_eq!(json["top_expense_categories"][0]["percentage"], "66.67");
    assert_eq!(json["recent_records"][0]["type"], "expense");
    assert_eq!(json["monthly_trend"].as_array().unwrap().len(), 6);
    assert_eq!(json["daily_trend"][0]["date"], "2024-02-04");
}
