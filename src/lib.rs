//! Review scheduling and progression engine for a flashcard study app.
//!
//! Pure, deterministic core logic: SM-2 derived rescheduling of reviewed
//! cards, the XP/level curve, the level-dependent achievement catalog, and
//! per-session accounting. Persistence, networking and UI live in the host
//! application; the engine only exchanges plain records with it.

pub mod error;
pub mod models;
pub mod progression;
pub mod scheduler;
pub mod session;

pub use error::EngineError;
pub use models::{
    Achievement, CardSchedulingState, CardWrite, CollectionStats, ConditionType, IntervalSetting,
    IntervalTable, IntervalUnit, ProgressCounters, ProgressWrite, Quality, UserProgress,
};
pub use progression::{AchievementCatalog, level_for_xp, xp_for_level};
pub use scheduler::{DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR, ScheduleUpdate, schedule_review};
pub use session::{
    CHALLENGE_XP_PER_CORRECT, CREATION_XP_PER_CARD, ChallengeOutcome, CreationOutcome,
    ReviewSession, SESSION_XP_BONUS, SessionCard, SessionKind, SessionOutcome, SessionPhase,
    SessionStats, complete_challenge, record_cards_created,
};
