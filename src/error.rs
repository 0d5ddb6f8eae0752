//! Error types for the review scheduling and progression engine.
//!
//! Every failure here is a synchronous validation error surfaced to the
//! caller; the engine performs no I/O and never retries internally.

use thiserror::Error;

use crate::models::IntervalUnit;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Quality rating outside the accepted 1..=4 range.
    #[error("invalid quality rating {0}, expected 1 (wrong) to 4 (easy)")]
    InvalidQuality(u8),

    /// An interval setting with a zero delay. Configuration is expected to
    /// be pre-sanitized; a zero value would produce a nonsensical schedule,
    /// so the scheduler refuses to run rather than clamping silently.
    #[error("invalid interval setting for {quality}: {value} {unit:?} is not a positive delay")]
    InvalidIntervalSetting {
        quality: &'static str,
        value: u32,
        unit: IntervalUnit,
    },

    /// Two catalog tables produced the same achievement id. This is a
    /// programmer error in the static tables, caught at catalog build time.
    #[error("duplicate achievement id '{0}' in generated catalog")]
    DuplicateAchievementId(String),

    /// An update tried to decrease a monotonic cumulative counter.
    #[error("counter regression: {counter} cannot go from {from} to {to}")]
    CounterRegression {
        counter: &'static str,
        from: u64,
        to: u64,
    },

    /// A review event arrived after every card in the session was consumed.
    #[error("session already completed, no cards left to review")]
    SessionExhausted,

    /// Session completion was requested while cards remain unreviewed.
    #[error("session still in progress, {remaining} card(s) left to review")]
    SessionIncomplete { remaining: usize },
}
