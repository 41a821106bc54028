//! JSON ledger snapshots.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use tally_core::budget::BudgetDefinition;
use tally_core::ledger::{CategoryInfo, InMemoryLedger, MoneyEntry};
use tally_shared::types::UserId;

/// Categories plus per-user entries and budgets.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    /// Category table shared by every user.
    #[serde(default)]
    pub categories: Vec<CategoryInfo>,
    /// Users in the snapshot.
    pub users: Vec<UserSnapshot>,
}

/// One user's ledger and budgets.
#[derive(Debug, Deserialize)]
pub struct UserSnapshot {
    /// Owner of the entries.
    pub user_id: UserId,
    /// Ledger entries.
    #[serde(default)]
    pub entries: Vec<MoneyEntry>,
    /// Budget definitions.
    #[serde(default)]
    pub budgets: Vec<BudgetDefinition>,
}

impl Snapshot {
    /// Reads, parses and validates a snapshot file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks every budget definition.
    pub fn validate(&self) -> anyhow::Result<()> {
        for user in &self.users {
            for budget in &user.budgets {
                budget.validate().with_context(|| {
                    format!("invalid budget {:?} for user {}", budget.name, user.user_id)
                })?;
            }
        }
        Ok(())
    }

    /// Picks `user_id`, or the first user when none is given.
    pub fn user(&self, user_id: Option<UserId>) -> anyhow::Result<&UserSnapshot> {
        match user_id {
            Some(id) => self
                .users
                .iter()
                .find(|u| u.user_id == id)
                .with_context(|| format!("user {id} not found in snapshot")),
            None => match self.users.first() {
                Some(user) => Ok(user),
                None => bail!("snapshot contains no users"),
            },
        }
    }

    /// Builds an in-memory ledger holding every user's entries.
    pub fn ledger(&self) -> anyhow::Result<InMemoryLedger> {
        let mut ledger = InMemoryLedger::new();
        for category in &self.categories {
            ledger.add_category(category.clone());
        }
        for user in &self.users {
            ledger
                .extend(user.user_id, user.entries.iter().cloned())
                .with_context(|| format!("invalid entry for user {}", user.user_id))?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tally_core::budget::BudgetScope;

    const SNAPSHOT: &str = r#"{
        "categories": [
            {"id": "00000000-0000-0000-0000-000000000002", "name": "Food", "icon": "🍜", "kind": "expense"}
        ],
        "users": [
            {
                "user_id": "00000000-0000-0000-0000-0000000000aa",
                "entries": [
                    {"amount": "12.50", "kind": "expense", "category_id": "00000000-0000-0000-0000-000000000002", "project_id": null, "occurred_on": "2024-03-02"},
                    {"amount": "1000", "kind": "income", "category_id": null, "project_id": null, "occurred_on": "2024-03-01"}
                ],
                "budgets": [
                    {"name": "Food", "category_id": "00000000-0000-0000-0000-000000000002", "amount": "300"}
                ]
            },
            {"user_id": "00000000-0000-0000-0000-0000000000bb"}
        ]
    }"#;

    #[test]
    fn test_snapshot_parses_with_defaults() {
        let snapshot: Snapshot = serde_json::from_str(SNAPSHOT).unwrap();

        assert_eq!(snapshot.users.len(), 2);
        let first = &snapshot.users[0];
        assert_eq!(first.entries[0].amount, dec!(12.50));
        assert_eq!(first.budgets[0].alert_threshold, dec!(80));
        assert!(matches!(first.budgets[0].scope, BudgetScope::Category(_)));
        assert!(snapshot.users[1].entries.is_empty());
    }

    #[test]
    fn test_user_selection() {
        let snapshot: Snapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let second: UserId = "00000000-0000-0000-0000-0000000000bb".parse().unwrap();

        assert_eq!(snapshot.user(None).unwrap().entries.len(), 2);
        assert_eq!(snapshot.user(Some(second)).unwrap().user_id, second);
        assert!(snapshot.user(Some(UserId::new())).is_err());
    }

    #[test]
    fn test_ledger_holds_every_user() {
        let snapshot: Snapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let ledger = snapshot.ledger().unwrap();

        assert_eq!(ledger.len_for(snapshot.users[0].user_id), 2);
        assert_eq!(ledger.len_for(snapshot.users[1].user_id), 0);
    }

    #[test]
    fn test_budget_validation() {
        let snapshot: Snapshot = serde_json::from_str(SNAPSHOT).unwrap();
        assert!(snapshot.validate().is_ok());

        for broken in [r#""amount": "0""#, r#""amount": "-50""#] {
            let raw = SNAPSHOT.replace(r#""amount": "300""#, broken);
            let snapshot: Snapshot = serde_json::from_str(&raw).unwrap();
            let err = snapshot.validate().unwrap_err();
            assert!(err.to_string().contains("invalid budget \"Food\""));
        }
    }

    #[test]
    fn test_load_rejects_invalid_budget() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.replace(r#""amount": "300""#, r#""amount": "0""#).as_bytes())
            .unwrap();

        let err = Snapshot::load(file.path()).unwrap_err();

        assert!(err.to_string().starts_with("invalid budget"));
    }

    #[test]
    fn test_negative_entry_rejected() {
        let raw = SNAPSHOT.replace("\"12.50\"", "\"-12.50\"");
        let snapshot: Snapshot = serde_json::from_str(&raw).unwrap();

        assert!(snapshot.ledger().is_err());
    }
}
