//! Text search over entries
//!
//! Matches a query against the long-form date of each entry and against its
//! answers, ignoring case.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::Entry;

/// Full date and short time, e.g. "Friday, October 16, 2026 at 9:41 PM"
pub fn render_long_date<Tz>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.with_timezone(tz)
        .format("%A, %B %-d, %Y at %-I:%M %p")
        .to_string()
}

/// Entries whose rendered date or any answer contains `query`
///
/// A blank query returns every entry. Order is preserved.
pub fn search<'a, Tz>(entries: &'a [Entry], query: &str, tz: &Tz) -> Vec<&'a Entry>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| matches_query(entry, &query, tz))
        .collect()
}

fn matches_query<Tz>(entry: &Entry, query: &str, tz: &Tz) -> bool
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    render_long_date(entry.date(), tz)
        .to_lowercase()
        .contains(query)
        || entry
            .answers()
            .iter()
            .any(|answer| answer.to_lowercase().contains(query))
}
