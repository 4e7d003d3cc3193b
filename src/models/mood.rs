//! Mood scale
//!
//! A closed 5-point ordinal scale. Moods are persisted as their numeric
//! value (1 through 5).

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How the day felt, from very bad (1) to very good (5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Mood {
    VeryBad = 1,
    Bad = 2,
    #[default]
    Neutral = 3,
    Good = 4,
    VeryGood = 5,
}

impl Mood {
    /// All moods in ascending order
    pub fn all() -> &'static [Mood] {
        &[
            Self::VeryBad,
            Self::Bad,
            Self::Neutral,
            Self::Good,
            Self::VeryGood,
        ]
    }

    /// Numeric value as persisted
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Look up a mood by its numeric value
    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::VeryBad),
            2 => Some(Self::Bad),
            3 => Some(Self::Neutral),
            4 => Some(Self::Good),
            5 => Some(Self::VeryGood),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryBad => "Very Bad",
            Self::Bad => "Bad",
            Self::Neutral => "Neutral",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::VeryBad => "😖",
            Self::Bad => "😕",
            Self::Neutral => "😐",
            Self::Good => "🙂",
            Self::VeryGood => "😄",
        }
    }

    /// Good or better
    pub fn is_positive(self) -> bool {
        self >= Self::Good
    }

    /// Bad or worse
    pub fn is_negative(self) -> bool {
        self <= Self::Bad
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Mood {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

/// Error returned when text does not name a mood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodParseError(pub String);

impl fmt::Display for MoodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown mood '{}' (use 1-5, or very-bad, bad, neutral, good, very-good)",
            self.0
        )
    }
}

impl std::error::Error for MoodParseError {}

impl FromStr for Mood {
    type Err = MoodParseError;

    /// Accepts the numeric value or a label in any case, with spaces,
    /// hyphens or underscores between words
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        if let Ok(n) = normalized.parse::<u64>() {
            return Self::from_value(n).ok_or_else(|| MoodParseError(s.to_string()));
        }

        match normalized.as_str() {
            "verybad" => Ok(Self::VeryBad),
            "bad" => Ok(Self::Bad),
            "neutral" => Ok(Self::Neutral),
            "good" => Ok(Self::Good),
            "verygood" => Ok(Self::VeryGood),
            _ => Err(MoodParseError(s.to_string())),
        }
    }
}
