//! Response qualities and the user-configured interval table.
//!
//! Each of the four response qualities maps to a base delay the user picked
//! in their settings. The scheduler treats these as candidate intervals;
//! once a card graduates past the "correct" threshold, multiplicative
//! ease-based growth takes over.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Self-assessed recall quality for a reviewed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Wrong = 1,
    Doubt = 2,
    Correct = 3,
    Easy = 4,
}

impl Quality {
    /// Qualities 3 and 4 count as a successful recall.
    pub fn is_correct(self) -> bool {
        self as u8 >= 3
    }

    pub(crate) fn value(self) -> u8 {
        self as u8
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Quality::Wrong => "wrong",
            Quality::Doubt => "doubt",
            Quality::Correct => "correct",
            Quality::Easy => "easy",
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = EngineError;

    fn try_from(raw: u8) -> Result<Self, EngineError> {
        match raw {
            1 => Ok(Quality::Wrong),
            2 => Ok(Quality::Doubt),
            3 => Ok(Quality::Correct),
            4 => Ok(Quality::Easy),
            other => Err(EngineError::InvalidQuality(other)),
        }
    }
}

/// Unit of a review delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Minutes,
    Hours,
    #[default]
    Days,
}

impl IntervalUnit {
    /// Converts a value in this unit to (fractional) days.
    pub fn as_days(self, value: u32) -> f64 {
        match self {
            IntervalUnit::Minutes => f64::from(value) / 1440.0,
            IntervalUnit::Hours => f64::from(value) / 24.0,
            IntervalUnit::Days => f64::from(value),
        }
    }

    /// Calendar span for a value in this unit. Day spans preserve the time
    /// of day; any truncation to day granularity is a caller concern.
    pub fn span(self, value: u32) -> Duration {
        match self {
            IntervalUnit::Minutes => Duration::minutes(i64::from(value)),
            IntervalUnit::Hours => Duration::hours(i64::from(value)),
            IntervalUnit::Days => Duration::days(i64::from(value)),
        }
    }
}

/// A base delay: magnitude plus unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntervalSetting {
    pub value: u32,
    pub unit: IntervalUnit,
}

impl IntervalSetting {
    pub fn new(value: u32, unit: IntervalUnit) -> Self {
        Self { value, unit }
    }

    pub fn days(value: u32) -> Self {
        Self::new(value, IntervalUnit::Days)
    }

    pub fn as_days(&self) -> f64 {
        self.unit.as_days(self.value)
    }

    pub fn span(&self) -> Duration {
        self.unit.span(self.value)
    }
}

/// The user's base delays for all four response qualities, as stored on the
/// user record (four `{value, unit}` pairs).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntervalTable {
    #[serde(rename = "interval_wrong")]
    pub wrong: IntervalSetting,
    #[serde(rename = "interval_doubt")]
    pub doubt: IntervalSetting,
    #[serde(rename = "interval_correct")]
    pub correct: IntervalSetting,
    #[serde(rename = "interval_easy")]
    pub easy: IntervalSetting,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            wrong: IntervalSetting::days(1),
            doubt: IntervalSetting::days(3),
            correct: IntervalSetting::days(6),
            easy: IntervalSetting::days(15),
        }
    }
}

impl IntervalTable {
    /// Base delay configured for a response quality.
    pub fn get(&self, quality: Quality) -> &IntervalSetting {
        match quality {
            Quality::Wrong => &self.wrong,
            Quality::Doubt => &self.doubt,
            Quality::Correct => &self.correct,
            Quality::Easy => &self.easy,
        }
    }

    /// Rejects settings that would produce a zero-length delay.
    pub fn validate(&self) -> Result<(), EngineError> {
        for quality in [Quality::Wrong, Quality::Doubt, Quality::Correct, Quality::Easy] {
            let setting = self.get(quality);
            if setting.value == 0 {
                return Err(EngineError::InvalidIntervalSetting {
                    quality: quality.name(),
                    value: setting.value,
                    unit: setting.unit,
                });
            }
        }
        Ok(())
    }
}
