use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-owned grouping of snippets. `parent_id = None` means top level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One node of a user's collection tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionNode {
    pub collection: Collection,
    /// Snippets directly in this collection (not in descendants).
    pub snippet_count: u64,
    pub children: Vec<CollectionNode>,
}

impl CollectionNode {
    /// Snippets in this node and all of its descendants.
    #[must_use]
    pub fn total_snippets(&self) -> u64 {
        self.snippet_count
            + self
                .children
                .iter()
                .map(Self::total_snippets)
                .sum::<u64>()
    }
}
