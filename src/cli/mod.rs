//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the entry store and analytics.

pub mod entry;
pub mod overview;
pub mod streak;

pub use entry::{handle_entry_command, EntryCommands};
pub use overview::{handle_config_command, handle_questions_command, handle_week_command};
pub use streak::{handle_streak_command, StreakCommands};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{NightlyError, NightlyResult};
use crate::models::Entry;
use crate::storage::Storage;

/// Look up an entry by short id, full UUID or UUID prefix
pub(crate) fn find_entry(storage: &Storage, text: &str) -> NightlyResult<Entry> {
    storage
        .entries
        .find_by_prefix(text)?
        .ok_or_else(|| NightlyError::entry_not_found(text))
}

/// Parse a user-supplied date in local time
///
/// Accepts `YYYY-MM-DD` (local midnight), `YYYY-MM-DD HH:MM`, or RFC 3339.
pub(crate) fn parse_date_arg(text: &str) -> NightlyResult<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(date.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            NightlyError::Validation(format!(
                "Invalid date: '{}'. Use YYYY-MM-DD, 'YYYY-MM-DD HH:MM' or RFC 3339",
                text
            ))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| NightlyError::Validation(format!("'{}' does not exist in local time", text)))
}

/// Warn on stderr when the last change stayed in memory only
pub(crate) fn report_write_error(storage: &Storage) {
    if let Some(message) = storage.entries.last_write_error() {
        eprintln!("Warning: the change could not be saved to disk: {}", message);
    }
}
