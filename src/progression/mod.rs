pub mod catalog;
pub mod curve;

pub use catalog::AchievementCatalog;
pub use curve::{level_for_xp, xp_for_level};
