//! Ledger query facade consumed by the engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, ProjectId, UserId};

use super::entry::{EntryKind, MoneyEntry};
use super::error::LedgerError;
use crate::period::DateRange;

/// Optional filters composed with a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFilter {
    /// Only entries in this category.
    pub category_id: Option<CategoryId>,
    /// Only entries in this project.
    pub project_id: Option<ProjectId>,
    /// Only entries of this kind.
    pub kind: Option<EntryKind>,
}

impl LedgerFilter {
    /// Creates an empty filter (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one category.
    #[must_use]
    pub const fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restricts to one project.
    #[must_use]
    pub const fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts to one kind.
    #[must_use]
    pub const fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to a kind when one is given.
    #[must_use]
    pub const fn maybe_kind(mut self, kind: Option<EntryKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Returns true if `entry` passes every set filter.
    #[must_use]
    pub fn matches(&self, entry: &MoneyEntry) -> bool {
        self.category_id.is_none_or(|id| entry.category_id == Some(id))
            && self.project_id.is_none_or(|id| entry.project_id == Some(id))
            && self.kind.is_none_or(|kind| entry.kind == kind)
    }
}

/// Read access to a user's ledger.
///
/// Implementations may return entries in any order; the engine groups and
/// sorts on its own.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Returns every entry of `user_id` within `range` that passes `filter`.
    async fn query(
        &self,
        user_id: UserId,
        range: DateRange,
        filter: LedgerFilter,
    ) -> Result<Vec<MoneyEntry>, LedgerError>;

    /// Counts matching entries.
    async fn count(
        &self,
        user_id: UserId,
        range: DateRange,
        filter: LedgerFilter,
    ) -> Result<usize, LedgerError> {
        Ok(self.query(user_id, range, filter).await?.len())
    }
}
