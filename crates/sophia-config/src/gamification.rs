//! Point values and badge definitions.

use serde::{Deserialize, Serialize};
use sophia_core::entities::Badge;
use sophia_core::gamification::{PointsTable, default_badges};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GamificationConfig {
    #[serde(default)]
    pub points: PointsTable,

    /// Badge definitions synced into the database at startup. A TOML
    /// `[[gamification.badges]]` list replaces the defaults.
    #[serde(default = "default_badges")]
    pub badges: Vec<Badge>,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            points: PointsTable::default(),
            badges: default_badges(),
        }
    }
}
