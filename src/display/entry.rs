//! Entry display formatting
//!
//! Provides utilities for formatting entries for terminal display,
//! as history rows and as full question/answer listings.

use std::fmt;

use chrono::TimeZone;

use crate::analytics::render_long_date;
use crate::models::Entry;

/// Width of the answer preview in list rows
const PREVIEW_WIDTH: usize = 40;

/// Format a single entry as a history row
pub fn format_entry_row<Tz>(entry: &Entry, date_format: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let preview = entry
        .answers()
        .iter()
        .map(|a| a.trim())
        .find(|a| !a.is_empty())
        .map(|a| truncate(&a.replace('\n', " "), PREVIEW_WIDTH))
        .unwrap_or_else(|| "(no answers)".to_string());

    format!(
        "{:12} {:16} {} {:9} {}",
        entry.id().short(),
        entry.date().with_timezone(tz).format(date_format).to_string(),
        entry.mood().glyph(),
        entry.mood().label(),
        preview
    )
}

/// Format entries as a history list, newest first as given
pub fn format_entry_list<Tz>(entries: &[&Entry], date_format: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:16} {:11} {}\n",
        "ID", "Date", "Mood", "Answer"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for entry in entries {
        output.push_str(&format_entry_row(entry, date_format, tz));
        output.push('\n');
    }

    output.push_str(&format!("\nTotal: {} entries\n", entries.len()));
    output
}

/// Format every question with its answer
pub fn format_entry_details<Tz>(entry: &Entry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut output = String::new();

    output.push_str(&format!("Entry: {}\n", entry.id()));
    output.push_str(&format!("Date:  {}\n", render_long_date(entry.date(), tz)));
    output.push_str(&format!(
        "Mood:  {} {}\n",
        entry.mood().glyph(),
        entry.mood().label()
    ));

    for (i, (question, answer)) in entry.pairs().enumerate() {
        output.push('\n');
        output.push_str(&format!("{}. {}\n", i + 1, question));
        if answer.trim().is_empty() {
            output.push_str("   (no answer)\n");
        } else {
            for line in answer.lines() {
                output.push_str(&format!("   {}\n", line));
            }
        }
    }

    output
}

/// Truncate to at most `max_chars` characters, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
