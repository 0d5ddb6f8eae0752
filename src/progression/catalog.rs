//! Level-dependent achievement catalog.
//!
//! The catalog is regenerated from static tables on every read; it is a pure
//! function of the user's level, so nothing here is cached or mutated. Each
//! counter-gated table uses its own lookahead multiplier so the next few
//! goals become visible before they are reachable.

use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::error::EngineError;
use crate::models::{Achievement, ConditionType, ProgressCounters};

/// One row of a counter-gated table: the counter value to reach plus the
/// display strings.
struct MilestoneEntry {
    threshold: u64,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
}

const fn entry(
    threshold: u64,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
) -> MilestoneEntry {
    MilestoneEntry {
        threshold,
        title,
        description,
        icon,
    }
}

/// Level milestones. Icon depends on the tier; reward is `level * 100`.
const LEVEL_MILESTONES: [(u64, &str, &str); 10] = [
    (5, "Knowledge Explorer", "Discover new academic horizons"),
    (10, "Guardian of Wisdom", "Protect and cultivate hard-won knowledge"),
    (15, "Neural Navigator", "Master the connections of learning"),
    (20, "Mental Architect", "Build solid structures of knowledge"),
    (25, "Master of Discipline", "Reach exceptional study consistency"),
    (30, "Academic Legend", "Inspire others with your dedication"),
    (35, "Titan of Learning", "Reach epic heights of knowledge"),
    (40, "Emperor of Study", "Rule over vast domains of learning"),
    (45, "Intellectual Cosmonaut", "Explore galaxies of knowledge"),
    (50, "Deity of Knowledge", "Transcend the limits of human learning"),
];

/// Cards-created milestones; reward is `count * 3`.
const CARD_MILESTONES: [MilestoneEntry; 10] = [
    entry(10, "Seeds of Knowledge", "Plant the first ideas", "Sprout"),
    entry(25, "Concept Collector", "Gather pearls of knowledge", "Package"),
    entry(50, "Digital Librarian", "Organize vast mental archives", "Library"),
    entry(100, "Content Curator", "Select the best of what you know", "Filter"),
    entry(200, "Encyclopedic", "Accumulate encyclopedic wisdom", "BookOpen"),
    entry(350, "Intellectual Treasure", "Hoard riches of knowledge", "Gem"),
    entry(500, "Learning Empire", "Build an educational empire", "Castle"),
    entry(750, "Modern Oracle", "Hold an answer for everything", "Eye"),
    entry(1000, "Immortal Creator", "Leave an eternal legacy of knowledge", "Infinity"),
    entry(1500, "God of Creation", "Shape realities through knowledge", "Zap"),
];

/// Cards-reviewed milestones; reward is `count * 2`.
const REVIEW_MILESTONES: [MilestoneEntry; 8] = [
    entry(25, "Awakened Mind", "Awaken the power of repetition", "Sunrise"),
    entry(100, "Memory Soldier", "Fight back against forgetting", "Shield"),
    entry(300, "Mental Marathoner", "Run long cognitive distances", "Footprints"),
    entry(500, "Neural Alchemist", "Turn information into wisdom", "Beaker"),
    entry(1000, "Emperor of Review", "Command armies of memories", "Crown"),
    entry(2000, "Master of Time", "Rule the temporal dimension of learning", "Clock"),
    entry(3500, "Eternal Guardian", "Protect knowledge for all eternity", "Lock"),
    entry(5000, "Infinite Mind", "Transcend the limits of the human mind", "Brain"),
];

/// Sessions-completed milestones; reward is `count * 15`.
const SESSION_MILESTONES: [MilestoneEntry; 9] = [
    entry(3, "Sacred Ritual", "Establish the daily habit", "Flame"),
    entry(7, "Perfect Week", "Claim seven days of glory", "Calendar"),
    entry(15, "Iron Discipline", "Forge an unbreakable will", "Anvil"),
    entry(30, "Legendary Month", "Turn a month into legend", "Trophy"),
    entry(60, "Diamond Habit", "Crystallize excellence", "Diamond"),
    entry(100, "Study Centurion", "Lead a hundred battles of knowledge", "Sword"),
    entry(180, "Epic Half Year", "Carve six months of greatness", "Mountain"),
    entry(300, "Master of Consistency", "Perfect the art of regularity", "Target"),
    entry(365, "Immortal Year", "Create a year that will not be forgotten", "Star"),
];

/// Timed-challenge milestones; reward is `count * 25`.
const CHALLENGE_MILESTONES: [MilestoneEntry; 6] = [
    entry(3, "Against the Clock", "Beat the timer in 3 challenges", "Clock"),
    entry(10, "Master of Pressure", "Keep calm under pressure", "Flame"),
    entry(25, "Agility Ninja", "Finish challenges at speed", "Wind"),
    entry(50, "Record Breaker", "Break your own limits", "Anvil"),
    entry(75, "Unstoppable", "Nothing can hold you back", "Mountain"),
    entry(100, "Stopwatch Legend", "Master time itself", "Bolt"),
];

fn level_icon(level: u64) -> &'static str {
    if level <= 15 {
        "Badge"
    } else if level <= 30 {
        "Star"
    } else if level <= 45 {
        "Medal"
    } else {
        "Crown"
    }
}

/// The set of achievements visible at a given user level.
#[derive(Clone, Debug)]
pub struct AchievementCatalog {
    entries: Vec<Achievement>,
}

impl AchievementCatalog {
    /// Generates the catalog for `level`. Regenerating for the same level
    /// yields identical ids and rewards. A duplicate id across tables is a
    /// programmer error and fails the build.
    pub fn for_level(level: u32) -> Result<Self, EngineError> {
        let level = u64::from(level);
        let mut entries = Vec::new();

        // First-time achievements exist at every level.
        entries.push(Achievement {
            id: "first_card".to_owned(),
            title: "First Step",
            description: "Create your first flashcard".to_owned(),
            icon: "Plus",
            xp_reward: 50,
            condition_type: ConditionType::CardsCreated,
            condition_value: 1,
        });
        entries.push(Achievement {
            id: "first_review".to_owned(),
            title: "Active Memory",
            description: "Review your first 5 cards".to_owned(),
            icon: "History",
            xp_reward: 100,
            condition_type: ConditionType::CardsReviewed,
            condition_value: 5,
        });
        entries.push(Achievement {
            id: "first_session".to_owned(),
            title: "Winning Routine",
            description: "Complete your first review session".to_owned(),
            icon: "CalendarCheck",
            xp_reward: 150,
            condition_type: ConditionType::SessionsCompleted,
            condition_value: 1,
        });

        // Level milestones: a fixed lookahead window of 20 levels.
        for (threshold, title, description) in LEVEL_MILESTONES {
            if threshold <= level + 20 {
                entries.push(Achievement {
                    id: format!("level_{threshold}"),
                    title,
                    description: format!("{description} - level {threshold}"),
                    icon: level_icon(threshold),
                    xp_reward: threshold * 100,
                    condition_type: ConditionType::UserLevel,
                    condition_value: threshold,
                });
            }
        }

        // Counter milestones, each with its own lookahead multiplier.
        for m in &CARD_MILESTONES {
            if m.threshold <= level * 75 {
                entries.push(Achievement {
                    id: format!("cards_{}", m.threshold),
                    title: m.title,
                    description: format!("{} ({} flashcards)", m.description, m.threshold),
                    icon: m.icon,
                    xp_reward: m.threshold * 3,
                    condition_type: ConditionType::CardsCreated,
                    condition_value: m.threshold,
                });
            }
        }
        for m in &REVIEW_MILESTONES {
            if m.threshold <= level * 150 {
                entries.push(Achievement {
                    id: format!("review_{}", m.threshold),
                    title: m.title,
                    description: format!("{} ({} reviews)", m.description, m.threshold),
                    icon: m.icon,
                    xp_reward: m.threshold * 2,
                    condition_type: ConditionType::CardsReviewed,
                    condition_value: m.threshold,
                });
            }
        }
        for m in &SESSION_MILESTONES {
            if m.threshold <= level * 20 {
                entries.push(Achievement {
                    id: format!("session_{}", m.threshold),
                    title: m.title,
                    description: format!("{} ({} sessions)", m.description, m.threshold),
                    icon: m.icon,
                    xp_reward: m.threshold * 15,
                    condition_type: ConditionType::SessionsCompleted,
                    condition_value: m.threshold,
                });
            }
        }
        for m in &CHALLENGE_MILESTONES {
            if m.threshold <= level * 8 {
                entries.push(Achievement {
                    id: format!("challenge_{}", m.threshold),
                    title: m.title,
                    description: format!("{} ({} challenges)", m.description, m.threshold),
                    icon: m.icon,
                    xp_reward: m.threshold * 25,
                    condition_type: ConditionType::TimedChallengesCompleted,
                    condition_value: m.threshold,
                });
            }
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for achievement in &entries {
            if !seen.insert(achievement.id.as_str()) {
                return Err(EngineError::DuplicateAchievementId(achievement.id.clone()));
            }
        }

        debug!("generated catalog for level {level}: {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }

    /// Number of achievements visible at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many of the visible achievements the user has unlocked.
    pub fn unlocked_count(&self, unlocked: &BTreeSet<String>) -> usize {
        self.entries
            .iter()
            .filter(|a| unlocked.contains(&a.id))
            .count()
    }

    /// Entries not yet in `unlocked` whose condition is now satisfied by
    /// `counters` (or `level` for level-gated entries). Idempotent: feeding
    /// the result back into `unlocked` yields an empty second pass.
    pub fn evaluate_unlocks(
        &self,
        counters: &ProgressCounters,
        level: u32,
        unlocked: &BTreeSet<String>,
    ) -> Vec<&Achievement> {
        self.entries
            .iter()
            .filter(|a| !unlocked.contains(&a.id))
            .filter(|a| {
                let reached = match a.condition_type {
                    ConditionType::CardsCreated => counters.cards_created,
                    ConditionType::CardsReviewed => counters.cards_reviewed,
                    ConditionType::SessionsCompleted => counters.sessions_completed,
                    ConditionType::TimedChallengesCompleted => counters.challenges_completed,
                    ConditionType::UserLevel => u64::from(level),
                };
                reached >= a.condition_value
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(catalog: &AchievementCatalog) -> Vec<&str> {
        catalog.entries().iter().map(|a| a.id.as_str()).collect()
    }

    fn find<'a>(catalog: &'a AchievementCatalog, id: &str) -> &'a Achievement {
        catalog
            .entries()
            .iter()
            .find(|a| a.id == id)
            .unwrap_or_else(|| panic!("missing achievement {id}"))
    }

    #[test]
    fn test_first_time_achievements_always_present() {
        for level in [1, 7, 42] {
            let catalog = AchievementCatalog::for_level(level).unwrap();
            let ids = ids(&catalog);
            assert!(ids.contains(&"first_card"));
            assert!(ids.contains(&"first_review"));
            assert!(ids.contains(&"first_session"));
        }
    }

    #[test]
    fn test_level_one_catalog_window() {
        let catalog = AchievementCatalog::for_level(1).unwrap();
        let ids = ids(&catalog);

        // Level table: thresholds up to 1 + 20.
        assert!(ids.contains(&"level_5"));
        assert!(ids.contains(&"level_20"));
        assert!(!ids.contains(&"level_25"));

        // Cards: count <= 1 * 75.
        assert!(ids.contains(&"cards_10"));
        assert!(ids.contains(&"cards_50"));
        assert!(!ids.contains(&"cards_100"));

        // Reviews: count <= 1 * 150.
        assert!(ids.contains(&"review_100"));
        assert!(!ids.contains(&"review_300"));

        // Sessions: count <= 1 * 20.
        assert!(ids.contains(&"session_15"));
        assert!(!ids.contains(&"session_30"));

        // Challenges: count <= 1 * 8.
        assert!(ids.contains(&"challenge_3"));
        assert!(!ids.contains(&"challenge_10"));
    }

    #[test]
    fn test_catalog_grows_with_level() {
        let small = AchievementCatalog::for_level(1).unwrap();
        let large = AchievementCatalog::for_level(30).unwrap();
        assert!(large.len() > small.len());

        // Everything visible at level 1 is still visible at level 30.
        for id in ids(&small) {
            assert!(ids(&large).contains(&id), "lost {id} at higher level");
        }
    }

    #[test]
    fn test_ids_and_rewards_stable_across_levels() {
        let at_10 = AchievementCatalog::for_level(10).unwrap();
        let at_30 = AchievementCatalog::for_level(30).unwrap();

        for achievement in at_10.entries() {
            let other = find(&at_30, &achievement.id);
            assert_eq!(achievement.xp_reward, other.xp_reward, "{}", achievement.id);
            assert_eq!(achievement.condition_value, other.condition_value);
        }

        assert_eq!(find(&at_10, "level_10").xp_reward, 1000);
        assert_eq!(find(&at_10, "cards_50").xp_reward, 150);
        assert_eq!(find(&at_30, "review_1000").xp_reward, 2000);
        assert_eq!(find(&at_10, "session_30").xp_reward, 450);
        assert_eq!(find(&at_10, "challenge_25").xp_reward, 625);
    }

    #[test]
    fn test_regeneration_is_identical() {
        let a = AchievementCatalog::for_level(12).unwrap();
        let b = AchievementCatalog::for_level(12).unwrap();
        assert_eq!(a.entries(), b.entries());
    }

    #[test]
    fn test_evaluate_unlocks() {
        let catalog = AchievementCatalog::for_level(2).unwrap();
        let counters = ProgressCounters {
            cards_created: 12,
            cards_reviewed: 30,
            sessions_completed: 1,
            challenges_completed: 0,
        };

        let unlocked = BTreeSet::new();
        let newly = catalog.evaluate_unlocks(&counters, 2, &unlocked);
        let newly_ids: Vec<&str> = newly.iter().map(|a| a.id.as_str()).collect();

        assert!(newly_ids.contains(&"first_card"));
        assert!(newly_ids.contains(&"first_review"));
        assert!(newly_ids.contains(&"first_session"));
        assert!(newly_ids.contains(&"cards_10"));
        assert!(newly_ids.contains(&"review_25"));
        assert!(!newly_ids.contains(&"cards_25"));
        assert!(!newly_ids.contains(&"session_3"));
        // Level-gated entries compare against the user level.
        assert!(!newly_ids.contains(&"level_5"));
    }

    #[test]
    fn test_evaluate_unlocks_is_idempotent() {
        let catalog = AchievementCatalog::for_level(5).unwrap();
        let counters = ProgressCounters {
            cards_created: 100,
            cards_reviewed: 500,
            sessions_completed: 20,
            challenges_completed: 5,
        };

        let mut unlocked = BTreeSet::new();
        let first = catalog.evaluate_unlocks(&counters, 5, &unlocked);
        assert!(!first.is_empty());
        unlocked.extend(first.iter().map(|a| a.id.clone()));

        let second = catalog.evaluate_unlocks(&counters, 5, &unlocked);
        assert!(second.is_empty());
    }

    #[test]
    fn test_unlocked_count_only_counts_visible() {
        let catalog = AchievementCatalog::for_level(1).unwrap();
        let mut unlocked = BTreeSet::new();
        unlocked.insert("first_card".to_owned());
        // Not visible at level 1, must not be counted.
        unlocked.insert("level_50".to_owned());

        assert_eq!(catalog.unlocked_count(&unlocked), 1);
    }
}
