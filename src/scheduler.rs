//! SM-2 derived review scheduling.
//!
//! The scheduler decides when a reviewed card must be shown again and how
//! its ease factor evolves:
//! - Quality 1-2 (failure): the interval resets to the user's configured
//!   base delay for that quality. No ease adjustment.
//! - Quality 3-4 (success): the ease factor is updated with the SM-2
//!   polynomial and floored at 1.3. Once the card's current interval has
//!   reached the configured "correct" threshold, the next interval grows
//!   multiplicatively (`round(current_days * ease)`, always in days);
//!   before that it stays on the configured base delay.
//!
//! The computation is pure and deterministic: fixed inputs always produce
//! a bit-identical schedule.

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::EngineError;
use crate::models::{CardSchedulingState, IntervalTable, IntervalUnit, Quality};

/// Ease factor assigned to cards that were never reviewed.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Ease factor never drops below this.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// The scheduling fields produced by one review response. The caller folds
/// this into the card with [`CardSchedulingState::apply_review`], which also
/// bumps the study counters.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleUpdate {
    pub interval: u32,
    pub interval_unit: IntervalUnit,
    pub ease_factor: f64,
    pub next_review: DateTime<Utc>,
}

/// SM-2 ease adjustment: `ease + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))`,
/// floored at [`MIN_EASE_FACTOR`]. Adds +0.1 at quality 4, -0.1 at quality 3.
fn adjusted_ease(ease: f64, quality: Quality) -> f64 {
    let q = f64::from(quality.value());
    let adjusted = ease + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    adjusted.max(MIN_EASE_FACTOR)
}

/// Computes the next schedule for `state` given a response `quality`.
///
/// `now` is the moment the response was recorded; `next_review` is an
/// absolute timestamp obtained by calendar arithmetic in the resulting
/// interval's unit (day spans keep the time of day intact).
///
/// Fails loudly on a zero-delay interval setting instead of producing a
/// nonsensical schedule.
pub fn schedule_review(
    state: &CardSchedulingState,
    quality: Quality,
    table: &IntervalTable,
    now: DateTime<Utc>,
) -> Result<ScheduleUpdate, EngineError> {
    table.validate()?;

    let base = table.get(quality);
    let mut interval = base.value;
    let mut unit = base.unit;
    let mut ease = state.ease_factor;

    if quality.is_correct() {
        ease = adjusted_ease(ease, quality);

        let current_days = state.current_days();
        let threshold_days = table.correct.as_days();

        // Past the first correct-review horizon the interval graduates to
        // multiplicative growth, always expressed in days.
        if current_days > 0.0 && current_days >= threshold_days {
            interval = (current_days * ease).round() as u32;
            unit = IntervalUnit::Days;
        }
    }

    let next_review = now + unit.span(interval);
    debug!(
        "scheduled {:?} response: {} {:?}, ease {:.2}, due {}",
        quality, interval, unit, ease, next_review
    );

    Ok(ScheduleUpdate {
        interval,
        interval_unit: unit,
        ease_factor: ease,
        next_review,
    })
}
