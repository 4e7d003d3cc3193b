//! Calendar selection of recent entries
//!
//! Day and week membership use the local calendar of the given time zone,
//! not fixed 24-hour windows. Weeks are ISO weeks, compared together with
//! their week-year so the days around New Year group correctly.

use chrono::{DateTime, Datelike, IsoWeek, NaiveDate, TimeZone, Utc};

use crate::models::Entry;

/// Calendar day of an instant in `tz`
pub fn local_day<Tz: TimeZone>(date: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    date.with_timezone(tz).date_naive()
}

fn local_week<Tz: TimeZone>(date: DateTime<Utc>, tz: &Tz) -> IsoWeek {
    local_day(date, tz).iso_week()
}

/// Newest entry written on `day`
pub fn latest_on_day<'a, Tz: TimeZone>(
    entries: &'a [Entry],
    day: NaiveDate,
    tz: &Tz,
) -> Option<&'a Entry> {
    entries
        .iter()
        .filter(|e| local_day(e.date(), tz) == day)
        .max_by_key(|e| e.date())
}

pub fn today_entry<'a, Tz: TimeZone>(
    entries: &'a [Entry],
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<&'a Entry> {
    latest_on_day(entries, local_day(now, tz), tz)
}

pub fn yesterday_entry<'a, Tz: TimeZone>(
    entries: &'a [Entry],
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<&'a Entry> {
    local_day(now, tz)
        .pred_opt()
        .and_then(|yesterday| latest_on_day(entries, yesterday, tz))
}

/// Entries in the same ISO week (and week-year) as `now`, order preserved
pub fn entries_in_week<'a, Tz: TimeZone>(
    entries: &'a [Entry],
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<&'a Entry> {
    let week = local_week(now, tz);
    entries
        .iter()
        .filter(|e| local_week(e.date(), tz) == week)
        .collect()
}
