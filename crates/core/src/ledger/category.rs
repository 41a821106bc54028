//! Category lookup and display enrichment.
//!
//! Category names and icons only decorate report rows. A missing or
//! unreachable category leaves the display fields absent; the numbers are
//! computed before enrichment and never depend on it.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tally_shared::types::CategoryId;
use tracing::warn;

use super::entry::EntryKind;
use super::error::LedgerError;

/// Category record as exposed by the category store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Icon name or emoji.
    #[serde(default)]
    pub icon: Option<String>,
    /// Parent category, for nested trees.
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Whether this is an income or expense category.
    pub kind: EntryKind,
}

/// Read access to category display data.
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    /// Returns the category, or `None` if it does not exist.
    async fn lookup(&self, id: CategoryId) -> Result<Option<CategoryInfo>, LedgerError>;
}

/// Display fields attached to a report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDisplay {
    /// Category name.
    pub category_name: String,
    /// Category icon.
    pub category_icon: Option<String>,
    /// Parent category.
    pub parent_id: Option<CategoryId>,
    /// Category kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl From<CategoryInfo> for CategoryDisplay {
    fn from(info: CategoryInfo) -> Self {
        Self {
            category_name: info.name,
            category_icon: info.icon,
            parent_id: info.parent_id,
            kind: info.kind,
        }
    }
}

/// Categories resolved for one report.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    resolved: HashMap<CategoryId, CategoryDisplay>,
}

impl CategoryDirectory {
    /// Looks up every id once. Failures are logged and left unresolved.
    pub async fn load<I>(lookup: &dyn CategoryLookup, ids: I) -> Self
    where
        I: IntoIterator<Item = CategoryId>,
    {
        let unique: BTreeSet<CategoryId> = ids.into_iter().collect();
        let mut resolved = HashMap::with_capacity(unique.len());

        for id in unique {
            match lookup.lookup(id).await {
                Ok(Some(info)) => {
                    resolved.insert(id, CategoryDisplay::from(info));
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, category_id = %id, "Category lookup failed"),
            }
        }

        Self { resolved }
    }

    /// Display fields for `id`, if it resolved.
    #[must_use]
    pub fn display(&self, id: Option<CategoryId>) -> Option<CategoryDisplay> {
        id.and_then(|id| self.resolved.get(&id).cloned())
    }
}
