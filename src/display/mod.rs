//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries, weekly overviews and streak
//! counters as plain text.

pub mod entry;
pub mod summary;

pub use entry::{format_entry_details, format_entry_list, format_entry_row, truncate};
pub use summary::{format_sparkline, format_streak, format_week_overview};
