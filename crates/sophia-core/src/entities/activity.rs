use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AwardedBadge, Badge, User};
use crate::enums::Activity;

/// One row of a user's activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEntry {
    pub id: String,
    pub user_id: String,
    pub activity: Activity,
    pub points: i64,
    /// The snippet or collection the activity was about, if any.
    pub subject_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregated activity counts and points for a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityStats {
    pub counts: BTreeMap<Activity, u64>,
    pub total_points: i64,
}

impl ActivityStats {
    #[must_use]
    pub fn count(&self, activity: Activity) -> u64 {
        self.counts.get(&activity).copied().unwrap_or(0)
    }
}

/// Result of recording an activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityOutcome {
    pub points_awarded: i64,
    pub total_points: i64,
    pub new_badges: Vec<Badge>,
}

/// Everything the profile view shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub total_points: i64,
    pub stats: ActivityStats,
    pub badges: Vec<AwardedBadge>,
    pub snippet_count: u64,
    pub collection_count: u64,
}
