//! Unlockable achievements.
//!
//! Achievements are generated from static tables by the catalog, never
//! persisted; only the unlocked id set lives on the user record.

use serde::{Deserialize, Serialize};

/// Which cumulative statistic an achievement condition is tested against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    CardsCreated,
    CardsReviewed,
    SessionsCompleted,
    TimedChallengesCompleted,
    UserLevel,
}

/// A single unlockable milestone.
///
/// `id` is derived from the source table and threshold (`level_10`,
/// `cards_50`, ...) and is stable across catalog regenerations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Achievement {
    pub id: String,
    pub title: &'static str,
    pub description: String,
    pub icon: &'static str,
    pub xp_reward: u64,
    pub condition_type: ConditionType,
    pub condition_value: u64,
}
