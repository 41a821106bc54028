//! In-memory ledger store.
//!
//! Reference implementation of [`LedgerQuery`] and [`CategoryLookup`] used by
//! tests and by the offline report runner.

use std::collections::HashMap;

use async_trait::async_trait;
use tally_shared::types::{CategoryId, UserId};

use super::category::{CategoryInfo, CategoryLookup};
use super::entry::MoneyEntry;
use super::error::LedgerError;
use super::query::{LedgerFilter, LedgerQuery};
use crate::period::DateRange;

/// Ledger held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    entries: HashMap<UserId, Vec<MoneyEntry>>,
    categories: HashMap<CategoryId, CategoryInfo>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NegativeAmount` for a negative amount.
    pub fn insert(&mut self, user_id: UserId, entry: MoneyEntry) -> Result<(), LedgerError> {
        entry.validate()?;
        self.entries.entry(user_id).or_default().push(entry);
        Ok(())
    }

    /// Records several entries for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; earlier entries stay recorded.
    pub fn extend<I>(&mut self, user_id: UserId, entries: I) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = MoneyEntry>,
    {
        for entry in entries {
            self.insert(user_id, entry)?;
        }
        Ok(())
    }

    /// Registers a category.
    pub fn add_category(&mut self, category: CategoryInfo) {
        self.categories.insert(category.id, category);
    }

    /// Number of entries stored for `user_id`.
    #[must_use]
    pub fn len_for(&self, user_id: UserId) -> usize {
        self.entries.get(&user_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl LedgerQuery for InMemoryLedger {
    async fn query(
        &self,
        user_id: UserId,
        range: DateRange,
        filter: LedgerFilter,
    ) -> Result<Vec<MoneyEntry>, LedgerError> {
        Ok(self
            .entries
            .get(&user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| range.contains(e.occurred_on) && filter.matches(e))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl CategoryLookup for InMemoryLedger {
    async fn lookup(&self, id: CategoryId) -> Result<Option<CategoryInfo>, LedgerError> {
        Ok(self.categories.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntryKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_query_respects_user_range_and_filter() {
        let alice = UserId::from_uuid(Uuid::from_u128(1));
        let bob = UserId::from_uuid(Uuid::from_u128(2));
        let mut ledger = InMemoryLedger::new();
        ledger
            .extend(
                alice,
                [
                    MoneyEntry::new(dec!(5), EntryKind::Expense, date(1)).unwrap(),
                    MoneyEntry::new(dec!(7), EntryKind::Income, date(2)).unwrap(),
                    MoneyEntry::new(dec!(9), EntryKind::Expense, date(20)).unwrap(),
                ],
            )
            .unwrap();
        ledger
            .insert(bob, MoneyEntry::new(dec!(100), EntryKind::Expense, date(1)).unwrap())
            .unwrap();

        let range = DateRange::new(date(1), date(10)).unwrap();
        let all = ledger.query(alice, range, LedgerFilter::new()).await.unwrap();
        assert_eq!(all.len(), 2);

        let expenses = ledger
            .count(alice, range, LedgerFilter::new().kind(EntryKind::Expense))
            .await
            .unwrap();
        assert_eq!(expenses, 1);

        let nobody = UserId::from_uuid(Uuid::from_u128(3));
        assert!(ledger.query(nobody, range, LedgerFilter::new()).await.unwrap().is_empty());
    }

    #[test]
    fn test_insert_rejects_negative_amount() {
        let mut ledger = InMemoryLedger::new();
        let entry = MoneyEntry {
            amount: dec!(-3),
            kind: EntryKind::Income,
            category_id: None,
            project_id: None,
            occurred_on: date(1),
        };
        assert!(ledger.insert(UserId::new(), entry).is_err());
    }
}
