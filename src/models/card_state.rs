//! Per-card scheduling state, due checks, and the card write record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::intervals::{IntervalUnit, Quality};
use crate::scheduler::{DEFAULT_EASE_FACTOR, ScheduleUpdate};

/// Highest review level a card can reach.
pub const MAX_REVIEW_LEVEL: u8 = 5;

/// The scheduling subset of a flashcard record.
///
/// A freshly created card has no schedule (`interval` 0, `next_review`
/// absent) and is due immediately. The state is mutated exactly once per
/// review response via [`apply_review`](Self::apply_review).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSchedulingState {
    /// Last applied delay, in its own unit. 0 means never scheduled.
    pub interval: u32,
    pub interval_unit: IntervalUnit,
    pub ease_factor: f64,
    pub next_review: Option<DateTime<Utc>>,
    pub last_studied: Option<DateTime<Utc>>,
    pub times_studied: u32,
    pub correct_answers: u32,
    /// 0..=5, bumped only on correct responses.
    pub review_level: u8,
}

impl Default for CardSchedulingState {
    fn default() -> Self {
        Self {
            interval: 0,
            interval_unit: IntervalUnit::Days,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review: None,
            last_studied: None,
            times_studied: 0,
            correct_answers: 0,
            review_level: 0,
        }
    }
}

impl CardSchedulingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interval converted to (fractional) days.
    pub fn current_days(&self) -> f64 {
        self.interval_unit.as_days(self.interval)
    }

    /// Full-timestamp due check: due when never reviewed or past due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.is_none_or(|due| due <= now)
    }

    /// Day-granularity due check for "due today" views: both sides are
    /// truncated to calendar dates before comparing.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.next_review.is_none_or(|due| due.date_naive() <= date)
    }

    /// Folds a scheduler result into the card and bumps the study counters:
    /// `times_studied` always, `correct_answers` and `review_level` (capped
    /// at [`MAX_REVIEW_LEVEL`]) only on a correct response.
    pub fn apply_review(&mut self, update: &ScheduleUpdate, quality: Quality, now: DateTime<Utc>) {
        self.interval = update.interval;
        self.interval_unit = update.interval_unit;
        self.ease_factor = update.ease_factor;
        self.next_review = Some(update.next_review);
        self.last_studied = Some(now);
        self.times_studied += 1;
        if quality.is_correct() {
            self.correct_answers += 1;
            self.review_level = (self.review_level + 1).min(MAX_REVIEW_LEVEL);
        }
    }
}

/// Partial update for one card record, emitted once per review for the
/// external entity store to persist. Writes for a single card must be
/// applied in review order; writes for different cards are independent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardWrite {
    pub card_id: String,
    pub interval: u32,
    pub interval_unit: IntervalUnit,
    pub ease_factor: f64,
    pub next_review: DateTime<Utc>,
    pub times_studied: u32,
    pub correct_answers: u32,
    pub review_level: u8,
    pub last_studied: DateTime<Utc>,
}

impl CardWrite {
    /// Snapshot of an already-updated card state. Only valid after
    /// [`CardSchedulingState::apply_review`] has run at least once.
    pub(crate) fn from_state(card_id: &str, state: &CardSchedulingState, now: DateTime<Utc>) -> Self {
        Self {
            card_id: card_id.to_owned(),
            interval: state.interval,
            interval_unit: state.interval_unit,
            ease_factor: state.ease_factor,
            next_review: state.next_review.unwrap_or(now),
            times_studied: state.times_studied,
            correct_answers: state.correct_answers,
            review_level: state.review_level,
            last_studied: state.last_studied.unwrap_or(now),
        }
    }
}

/// Aggregate statistics over a card collection, for dashboard-style views.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    /// Cards studied at least once.
    pub studied: usize,
    pub total_answers: u64,
    pub correct_answers: u64,
    /// Cards due at `now` under the full-timestamp policy.
    pub due_now: usize,
}

impl CollectionStats {
    pub fn from_cards(cards: &[CardSchedulingState], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total: cards.len(),
            ..Self::default()
        };
        for card in cards {
            if card.times_studied > 0 {
                stats.studied += 1;
            }
            stats.total_answers += u64::from(card.times_studied);
            stats.correct_answers += u64::from(card.correct_answers);
            if card.is_due(now) {
                stats.due_now += 1;
            }
        }
        stats
    }

    /// Share of correct answers, 0..=100. Zero when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        if self.total_answers == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.total_answers as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_new_card_is_due() {
        let card = CardSchedulingState::new();
        assert!(card.is_due(at(2024, 1, 1, 0)));
        assert!(card.is_due_on(at(2024, 1, 1, 0).date_naive()));
        assert_eq!(card.ease_factor, 2.5);
    }

    #[test]
    fn test_full_timestamp_due_check() {
        let card = CardSchedulingState {
            next_review: Some(at(2024, 3, 10, 15)),
            ..CardSchedulingState::new()
        };

        assert!(!card.is_due(at(2024, 3, 10, 14)));
        assert!(card.is_due(at(2024, 3, 10, 15)));
        assert!(card.is_due(at(2024, 3, 11, 0)));
    }

    #[test]
    fn test_day_granularity_due_check() {
        let card = CardSchedulingState {
            next_review: Some(at(2024, 3, 10, 15)),
            ..CardSchedulingState::new()
        };

        // Same calendar day counts as due even before the exact time.
        assert!(card.is_due_on(at(2024, 3, 10, 8).date_naive()));
        assert!(!card.is_due_on(at(2024, 3, 9, 23).date_naive()));
    }

    #[test]
    fn test_review_level_caps_at_five() {
        let mut card = CardSchedulingState {
            review_level: 5,
            times_studied: 9,
            correct_answers: 7,
            ..CardSchedulingState::new()
        };
        let update = ScheduleUpdate {
            interval: 6,
            interval_unit: IntervalUnit::Days,
            ease_factor: 2.5,
            next_review: at(2024, 3, 16, 12),
        };

        card.apply_review(&update, Quality::Easy, at(2024, 3, 10, 12));

        assert_eq!(card.review_level, 5);
        assert_eq!(card.times_studied, 10);
        assert_eq!(card.correct_answers, 8);
        assert_eq!(card.last_studied, Some(at(2024, 3, 10, 12)));
    }

    #[test]
    fn test_wrong_answer_only_bumps_times_studied() {
        let mut card = CardSchedulingState::new();
        let update = ScheduleUpdate {
            interval: 1,
            interval_unit: IntervalUnit::Days,
            ease_factor: 2.5,
            next_review: at(2024, 3, 11, 12),
        };

        card.apply_review(&update, Quality::Wrong, at(2024, 3, 10, 12));

        assert_eq!(card.times_studied, 1);
        assert_eq!(card.correct_answers, 0);
        assert_eq!(card.review_level, 0);
    }

    #[test]
    fn test_collection_stats() {
        let now = at(2024, 3, 10, 12);
        let cards = vec![
            // Never reviewed: due.
            CardSchedulingState::new(),
            // Studied, due in the future.
            CardSchedulingState {
                next_review: Some(at(2024, 3, 20, 12)),
                times_studied: 4,
                correct_answers: 3,
                ..CardSchedulingState::new()
            },
            // Studied, overdue.
            CardSchedulingState {
                next_review: Some(at(2024, 3, 1, 12)),
                times_studied: 6,
                correct_answers: 2,
                ..CardSchedulingState::new()
            },
        ];

        let stats = CollectionStats::from_cards(&cards, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.studied, 2);
        assert_eq!(stats.total_answers, 10);
        assert_eq!(stats.correct_answers, 5);
        assert_eq!(stats.due_now, 2);
        assert_eq!(stats.accuracy(), 50.0);
    }

    #[test]
    fn test_accuracy_with_no_answers() {
        assert_eq!(CollectionStats::default().accuracy(), 0.0);
    }
}
