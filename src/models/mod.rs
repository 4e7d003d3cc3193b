//! Core data models for the nightly journal
//!
//! Entries, their identifiers, the mood scale, and the default prompt set.

pub mod entry;
pub mod ids;
pub mod mood;
pub mod questions;

pub use entry::Entry;
pub use ids::EntryId;
pub use mood::{Mood, MoodParseError};
pub use questions::{default_questions, NIGHTLY_QUESTIONS};
