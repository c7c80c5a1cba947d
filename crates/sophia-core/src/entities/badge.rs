use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A badge definition. `criteria` uses the grammar parsed by
/// [`crate::gamification::BadgeCriteria`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub criteria: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A badge held by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AwardedBadge {
    pub badge: Badge,
    pub awarded_at: DateTime<Utc>,
}
