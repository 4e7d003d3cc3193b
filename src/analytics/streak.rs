//! Sobriety streak counters
//!
//! Elapsed time since a user-chosen start date. Days and months follow the
//! local calendar: days count midnights crossed, months count whole calendar
//! months (a month from Jan 31 is the last day of February). A start date in
//! the future is treated as invalid and every counter reads zero.
//!
//! Nothing here caches; callers pass `now` each time.

use std::fmt;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use super::recent::local_day;

/// Average month length used for the continuous progress figure
pub const DAYS_PER_MONTH_APPROX: f64 = 30.4;

/// Whole calendar days from the day of `start` to the day of `now`
///
/// `None` when no start date is configured; zero when `start` is after `now`.
pub fn streak_days<Tz: TimeZone>(
    start: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<i64> {
    let start = start?;
    if start > now {
        return Some(0);
    }
    Some((local_day(now, tz) - local_day(start, tz)).num_days())
}

/// Whole calendar months from `start` to `now`
pub fn streak_months<Tz: TimeZone>(
    start: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<u32> {
    let start = start?;
    if start > now {
        return Some(0);
    }

    let start_local = start.with_timezone(tz).naive_local();
    let now_local = now.with_timezone(tz).naive_local();

    let naive_months = (now_local.year() - start_local.year()) * 12
        + (now_local.month() as i32 - start_local.month() as i32);
    let mut months = naive_months.max(0) as u32;

    // The month difference overshoots by one when the day/time of `now`
    // hasn't reached that of `start` yet
    if months > 0 {
        let reached = start_local
            .checked_add_months(Months::new(months))
            .map_or(false, |anniversary| anniversary <= now_local);
        if !reached {
            months -= 1;
        }
    }

    Some(months)
}

/// Whole years, derived from calendar months
pub fn streak_years<Tz: TimeZone>(
    start: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<u32> {
    streak_months(start, now, tz).map(|m| m / 12)
}

/// Continuous month figure for progress display
pub fn approx_months(total_days: i64) -> f64 {
    total_days as f64 / DAYS_PER_MONTH_APPROX
}

/// Milestone chip earned, chosen from whole calendar months
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Milestone {
    TwentyFourHours,
    OneMonth,
    TwoMonths,
    ThreeMonths,
    SixMonths,
    NineMonths,
    OneYear,
}

impl Milestone {
    pub fn from_months(months: u32) -> Self {
        match months {
            0 => Self::TwentyFourHours,
            1 => Self::OneMonth,
            2 => Self::TwoMonths,
            3..=5 => Self::ThreeMonths,
            6..=8 => Self::SixMonths,
            9..=11 => Self::NineMonths,
            _ => Self::OneYear,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TwentyFourHours => "24 hours",
            Self::OneMonth => "1 month",
            Self::TwoMonths => "2 months",
            Self::ThreeMonths => "3 months",
            Self::SixMonths => "6 months",
            Self::NineMonths => "9 months",
            Self::OneYear => "1 year",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// All streak counters for one moment
#[derive(Debug, Clone, PartialEq)]
pub struct StreakStats {
    /// Local calendar day of the start date
    pub start_day: NaiveDate,
    /// False when the start date is in the future
    pub valid: bool,
    pub seconds: i64,
    pub hours: i64,
    pub days: i64,
    pub months: u32,
    pub years: u32,
    pub approx_months: f64,
    pub milestone: Option<Milestone>,
}

impl StreakStats {
    /// Compute every counter; `None` when no start date is configured
    pub fn compute<Tz: TimeZone>(
        start: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Option<Self> {
        let start_at = start?;
        let start_day = local_day(start_at, tz);

        if start_at > now {
            return Some(Self {
                start_day,
                valid: false,
                seconds: 0,
                hours: 0,
                days: 0,
                months: 0,
                years: 0,
                approx_months: 0.0,
                milestone: None,
            });
        }

        let elapsed_ms = (now - start_at).num_milliseconds();
        let seconds = (elapsed_ms as f64 / 1000.0).round() as i64;
        let days = streak_days(start, now, tz).unwrap_or(0);
        let months = streak_months(start, now, tz).unwrap_or(0);

        Some(Self {
            start_day,
            valid: true,
            seconds,
            hours: seconds / 3600,
            days,
            months,
            years: months / 12,
            approx_months: approx_months(days),
            milestone: Some(Milestone::from_months(months)),
        })
    }

    /// One-line message suitable for sharing progress
    pub fn share_message(&self) -> String {
        if !self.valid {
            return "I just started tracking my sobriety with Nightly.".to_string();
        }

        let mut parts = vec![format!(
            "I've been sober for {} day{}",
            self.days,
            plural(self.days)
        )];
        if self.years >= 1 {
            parts.push(format!("({} year{}).", self.years, plural(self.years as i64)));
        } else if self.months >= 1 {
            parts.push(format!("({} month{}).", self.months, plural(self.months as i64)));
        }
        parts.push(format!(
            "Sobriety date: {}.",
            self.start_day.format("%b %-d, %Y")
        ));
        parts.push("#sober #onedayatatime".to_string());
        parts.join(" ")
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
