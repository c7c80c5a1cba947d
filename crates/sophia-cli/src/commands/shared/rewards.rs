use serde::Serialize;
use sophia_core::entities::{ActivityOutcome, Badge};

/// Points and badges earned by one command, possibly over several activities.
#[derive(Debug, Default, Serialize)]
pub struct Rewards {
    pub points_awarded: i64,
    /// Running total after the last recorded activity, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_points: Option<i64>,
    pub new_badges: Vec<String>,
}

impl Rewards {
    pub fn add(&mut self, outcome: ActivityOutcome) {
        self.points_awarded += outcome.points_awarded;
        self.total_points = Some(outcome.total_points);
        self.new_badges
            .extend(outcome.new_badges.into_iter().map(|b| b.name));
    }

    pub fn add_badges(&mut self, badges: Vec<Badge>) {
        self.new_badges.extend(badges.into_iter().map(|b| b.name));
    }
}

impl From<ActivityOutcome> for Rewards {
    fn from(outcome: ActivityOutcome) -> Self {
        let mut rewards = Self::default();
        rewards.add(outcome);
        rewards
    }
}
