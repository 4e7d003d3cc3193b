//! Read-only analytics over entry snapshots
//!
//! Pure functions: they take a slice of entries (normally
//! [`EntryStore::entries`](crate::storage::EntryStore::entries)) plus the
//! current time and a time zone, and never touch the store.

pub mod mood_summary;
pub mod recent;
pub mod search;
pub mod streak;
pub mod trend;

pub use mood_summary::{summarize_moods, this_week_summary, weekly_mood_summary, WeeklyMoodSummary};
pub use recent::{entries_in_week, latest_on_day, local_day, today_entry, yesterday_entry};
pub use search::{render_long_date, search};
pub use streak::{
    approx_months, streak_days, streak_months, streak_years, Milestone, StreakStats,
};
pub use trend::{average_mood, mood_series};
