//! Cumulative user progress: counters, XP, level, and unlocked achievements.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::progression::level_for_xp;

/// Monotonically non-decreasing activity counters, stored on the user
/// record under their `total_*` field names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCounters {
    #[serde(rename = "total_cards_created")]
    pub cards_created: u64,
    #[serde(rename = "total_cards_reviewed")]
    pub cards_reviewed: u64,
    #[serde(rename = "total_sessions_completed")]
    pub sessions_completed: u64,
    #[serde(rename = "total_challenges_completed")]
    pub challenges_completed: u64,
}

impl ProgressCounters {
    /// Replaces these counters with `updated`, rejecting any decrease.
    /// A regression is surfaced, never silently clamped.
    pub fn advance_to(&mut self, updated: &ProgressCounters) -> Result<(), EngineError> {
        let checks: [(&'static str, u64, u64); 4] = [
            ("cards_created", self.cards_created, updated.cards_created),
            ("cards_reviewed", self.cards_reviewed, updated.cards_reviewed),
            (
                "sessions_completed",
                self.sessions_completed,
                updated.sessions_completed,
            ),
            (
                "challenges_completed",
                self.challenges_completed,
                updated.challenges_completed,
            ),
        ];
        for (counter, from, to) in checks {
            if to < from {
                return Err(EngineError::CounterRegression { counter, from, to });
            }
        }
        *self = updated.clone();
        Ok(())
    }
}

/// The user's progression record. `level` is derived from `xp` and the two
/// are only ever written together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub xp: u64,
    pub level: u32,
    #[serde(default)]
    pub achievements_unlocked: BTreeSet<String>,
    #[serde(flatten)]
    pub counters: ProgressCounters,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl UserProgress {
    pub fn new() -> Self {
        Self {
            xp: 0,
            level: 1,
            achievements_unlocked: BTreeSet::new(),
            counters: ProgressCounters::default(),
        }
    }

    /// Folds a completed-session or challenge write back into the local
    /// copy, enforcing counter monotonicity.
    pub fn apply_write(&mut self, write: &ProgressWrite) -> Result<(), EngineError> {
        self.counters.advance_to(&write.counters)?;
        self.xp = write.xp;
        self.level = write.level;
        self.achievements_unlocked = write.achievements_unlocked.clone();
        Ok(())
    }

}

/// Partial update for the user record, emitted once per completed session
/// or timed challenge. `achievements_unlocked` is a full replacement set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressWrite {
    pub xp: u64,
    pub level: u32,
    pub achievements_unlocked: BTreeSet<String>,
    #[serde(flatten)]
    pub counters: ProgressCounters,
}

impl ProgressWrite {
    /// XP/level portion computed from a gained amount on top of `progress`.
    pub(crate) fn from_gain(progress: &UserProgress, xp_gained: u64, counters: ProgressCounters) -> Self {
        let xp = progress.xp + xp_gained;
        Self {
            xp,
            level: level_for_xp(xp),
            achievements_unlocked: progress.achievements_unlocked.clone(),
            counters,
        }
    }
}
