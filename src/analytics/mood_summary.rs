//! Weekly mood summary
//!
//! Reduces the moods logged in a week to one headline:
//!
//! - good-or-better and bad-or-worse both present: mixed
//! - only good-or-better: very good if any entry is very good, else good
//! - only bad-or-worse: very bad if any entry is very bad, else bad
//! - otherwise (only neutral): the most frequent mood, earliest seen on ties

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use super::recent::entries_in_week;
use crate::models::{Entry, Mood};

/// Headline mood for a week of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklyMoodSummary {
    Mixed,
    VeryGood,
    Good,
    Bad,
    VeryBad,
    /// Neither good nor bad moods were logged; the most common mood
    Dominant(Mood),
}

impl WeeklyMoodSummary {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mixed => "Mixed",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Bad => "Bad",
            Self::VeryBad => "Very Bad",
            Self::Dominant(mood) => mood.label(),
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Mixed => "🌓",
            Self::VeryGood => "🌕",
            Self::Good => "🌔",
            Self::Bad => "🌘",
            Self::VeryBad => "🌑",
            Self::Dominant(mood) => mood.glyph(),
        }
    }
}

impl fmt::Display for WeeklyMoodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.label())
    }
}

/// Summarize the moods of the given entries; `None` when there are none
pub fn weekly_mood_summary<'a, I>(entries: I) -> Option<WeeklyMoodSummary>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let moods: Vec<Mood> = entries.into_iter().map(Entry::mood).collect();
    summarize_moods(&moods)
}

/// Summary of the entries falling in the ISO week of `now`
pub fn this_week_summary<Tz: TimeZone>(
    entries: &[Entry],
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<WeeklyMoodSummary> {
    weekly_mood_summary(entries_in_week(entries, now, tz))
}

pub fn summarize_moods(moods: &[Mood]) -> Option<WeeklyMoodSummary> {
    if moods.is_empty() {
        return None;
    }

    let has_positive = moods.iter().any(|m| m.is_positive());
    let has_negative = moods.iter().any(|m| m.is_negative());

    let summary = match (has_positive, has_negative) {
        (true, true) => WeeklyMoodSummary::Mixed,
        (true, false) if moods.contains(&Mood::VeryGood) => WeeklyMoodSummary::VeryGood,
        (true, false) => WeeklyMoodSummary::Good,
        (false, true) if moods.contains(&Mood::VeryBad) => WeeklyMoodSummary::VeryBad,
        (false, true) => WeeklyMoodSummary::Bad,
        (false, false) => WeeklyMoodSummary::Dominant(most_frequent(moods)?),
    };

    Some(summary)
}

/// Most frequent mood; ties go to the one encountered first
fn most_frequent(moods: &[Mood]) -> Option<Mood> {
    let mut counts: Vec<(Mood, usize)> = Vec::new();
    for &mood in moods {
        match counts.iter_mut().find(|(m, _)| *m == mood) {
            Some((_, count)) => *count += 1,
            None => counts.push((mood, 1)),
        }
    }

    let mut best: Option<(Mood, usize)> = None;
    for (mood, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}
