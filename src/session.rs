//! Session accounting: one review pass over an ordered set of cards.
//!
//! A session owns its own copy of the card states fetched at session start;
//! every review emits a [`CardWrite`] the host persists in the background.
//! Completing a scheduled session feeds the cumulative counters into the
//! achievement catalog and the XP curve and emits one atomic
//! [`ProgressWrite`]. Abandoning a session mid-pass persists no progression
//! at all.

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::EngineError;
use crate::models::{
    Achievement, CardSchedulingState, CardWrite, IntervalTable, ProgressWrite, Quality,
    UserProgress,
};
use crate::progression::AchievementCatalog;
use crate::scheduler::schedule_review;

/// Flat XP awarded for finishing a scheduled session, on top of any
/// achievement rewards.
pub const SESSION_XP_BONUS: u64 = 50;

/// XP per correct answer in a timed challenge.
pub const CHALLENGE_XP_PER_CORRECT: u64 = 15;

/// XP per newly created card.
pub const CREATION_XP_PER_CARD: u64 = 10;

/// Whether a pass counts toward long-term progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    /// A due-card review session: reschedules cards and feeds the
    /// progression counters.
    Scheduled,
    /// An ad-hoc practice pass: tracks ephemeral statistics only, leaves
    /// every card's schedule and all counters untouched.
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    InProgress,
    Completed,
}

/// Ephemeral per-pass statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub reviewed: u32,
    pub correct: u32,
    pub incorrect: u32,
}

/// A card queued for review: the entity id plus its scheduling state.
#[derive(Clone, Debug)]
pub struct SessionCard {
    pub card_id: String,
    pub state: CardSchedulingState,
}

impl SessionCard {
    pub fn new(card_id: impl Into<String>, state: CardSchedulingState) -> Self {
        Self {
            card_id: card_id.into(),
            state,
        }
    }
}

/// What a completed session produced. `write` is `None` for custom passes,
/// which never touch persistent state.
#[derive(Clone, Debug)]
pub struct SessionOutcome {
    pub stats: SessionStats,
    pub newly_unlocked: Vec<Achievement>,
    pub xp_gained: u64,
    pub write: Option<ProgressWrite>,
}

/// One study/review pass over an ordered card sequence.
///
/// The index strictly advances: each call to [`record_review`] consumes the
/// next card exactly once, and [`complete`] consumes the session, so the
/// end-of-session accounting can run at most once.
///
/// [`record_review`]: Self::record_review
/// [`complete`]: Self::complete
#[derive(Debug)]
pub struct ReviewSession {
    kind: SessionKind,
    table: IntervalTable,
    cards: Vec<SessionCard>,
    index: usize,
    stats: SessionStats,
}

impl ReviewSession {
    pub fn new(kind: SessionKind, cards: Vec<SessionCard>, table: IntervalTable) -> Self {
        Self {
            kind,
            table,
            cards,
            index: 0,
            stats: SessionStats::default(),
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn phase(&self) -> SessionPhase {
        if self.index >= self.cards.len() {
            SessionPhase::Completed
        } else if self.index == 0 {
            SessionPhase::Idle
        } else {
            SessionPhase::InProgress
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The card the next review event applies to.
    pub fn current_card(&self) -> Option<&SessionCard> {
        self.cards.get(self.index)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.index
    }

    /// Records the response for the current card and advances the index.
    ///
    /// For scheduled sessions this reschedules the card and returns the
    /// partial update the host must persist, in review order per card. For
    /// custom passes only the ephemeral statistics change and `None` is
    /// returned.
    pub fn record_review(
        &mut self,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<Option<CardWrite>, EngineError> {
        if self.index >= self.cards.len() {
            return Err(EngineError::SessionExhausted);
        }

        let write = match self.kind {
            SessionKind::Custom => None,
            SessionKind::Scheduled => {
                let card = &mut self.cards[self.index];
                let update = schedule_review(&card.state, quality, &self.table, now)?;
                card.state.apply_review(&update, quality, now);
                Some(CardWrite::from_state(&card.card_id, &card.state, now))
            }
        };

        self.index += 1;
        self.stats.reviewed += 1;
        if quality.is_correct() {
            self.stats.correct += 1;
        } else {
            self.stats.incorrect += 1;
        }

        Ok(write)
    }

    /// Runs the end-of-session accounting and consumes the session.
    ///
    /// Only valid once every card was reviewed. For a scheduled session:
    /// bumps `cards_reviewed` and `sessions_completed`, evaluates newly
    /// satisfied achievements against the updated counters (the catalog is
    /// generated for the pre-session level), adds the flat session bonus
    /// plus unlock rewards to the XP total, and recomputes the level. The
    /// returned [`ProgressWrite`] is the single atomic user-record update
    /// to persist.
    pub fn complete(self, progress: &UserProgress) -> Result<SessionOutcome, EngineError> {
        let remaining = self.remaining();
        if remaining > 0 {
            return Err(EngineError::SessionIncomplete { remaining });
        }

        if self.kind == SessionKind::Custom {
            return Ok(SessionOutcome {
                stats: self.stats,
                newly_unlocked: Vec::new(),
                xp_gained: 0,
                write: None,
            });
        }

        let mut counters = progress.counters.clone();
        counters.cards_reviewed += u64::from(self.stats.reviewed);
        counters.sessions_completed += 1;

        let catalog = AchievementCatalog::for_level(progress.level)?;
        let newly_unlocked: Vec<Achievement> = catalog
            .evaluate_unlocks(&counters, progress.level, &progress.achievements_unlocked)
            .into_iter()
            .cloned()
            .collect();

        let reward_xp: u64 = newly_unlocked.iter().map(|a| a.xp_reward).sum();
        let xp_gained = SESSION_XP_BONUS + reward_xp;

        let mut write = ProgressWrite::from_gain(progress, xp_gained, counters);
        write
            .achievements_unlocked
            .extend(newly_unlocked.iter().map(|a| a.id.clone()));

        debug!(
            "session complete: {} reviewed, {} unlocked, +{} xp (level {} -> {})",
            self.stats.reviewed,
            newly_unlocked.len(),
            xp_gained,
            progress.level,
            write.level
        );

        Ok(SessionOutcome {
            stats: self.stats,
            newly_unlocked,
            xp_gained,
            write: Some(write),
        })
    }
}

/// Outcome of a finished timed challenge.
#[derive(Clone, Debug)]
pub struct ChallengeOutcome {
    pub xp_gained: u64,
    pub write: ProgressWrite,
}

/// Accounts for a completed timed challenge: `correct * 15` XP, one more
/// completed challenge, level recomputed. Challenges never touch card
/// schedules; achievement unlocks are evaluated at the next session end.
pub fn complete_challenge(progress: &UserProgress, correct: u32) -> ChallengeOutcome {
    let xp_gained = u64::from(correct) * CHALLENGE_XP_PER_CORRECT;
    let mut counters = progress.counters.clone();
    counters.challenges_completed += 1;

    ChallengeOutcome {
        xp_gained,
        write: ProgressWrite::from_gain(progress, xp_gained, counters),
    }
}

/// Outcome of saving a batch of newly created cards.
#[derive(Clone, Debug)]
pub struct CreationOutcome {
    pub xp_gained: u64,
    pub write: ProgressWrite,
}

/// Accounts for `count` newly created cards: 10 XP each, `cards_created`
/// bumped, level recomputed. Like challenges, creation defers achievement
/// unlocks to the next session end.
pub fn record_cards_created(progress: &UserProgress, count: u64) -> CreationOutcome {
    let xp_gained = count * CREATION_XP_PER_CARD;
    let mut counters = progress.counters.clone();
    counters.cards_created += count;

    CreationOutcome {
        xp_gained,
        write: ProgressWrite::from_gain(progress, xp_gained, counters),
    }
}
