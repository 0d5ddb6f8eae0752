pub mod achievement;
pub mod card_state;
pub mod intervals;
pub mod progress;

pub use achievement::{Achievement, ConditionType};
pub use card_state::{CardSchedulingState, CardWrite, CollectionStats, MAX_REVIEW_LEVEL};
pub use intervals::{IntervalSetting, IntervalTable, IntervalUnit, Quality};
pub use progress::{ProgressCounters, ProgressWrite, UserProgress};
