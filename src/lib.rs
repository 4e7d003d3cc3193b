//! Nightly - a nightly inventory journal
//!
//! This library provides the core of the Nightly journal: a fixed set of
//! evening reflection questions answered once a day, each session tagged
//! with a mood, persisted locally as a single JSON document, and summarized
//! into weekly mood headlines and a sobriety day counter.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Entries, ids, the mood scale and the default questions
//! - `storage`: Entry document codec and the entry store
//! - `analytics`: Search, weekly summaries, streaks and mood trends
//! - `display`: Plain-text formatting for the terminal
//! - `cli`: Command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use nightly::config::{paths::NightlyPaths, settings::Settings};
//! use nightly::models::Mood;
//! use nightly::storage::Storage;
//!
//! let paths = NightlyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! storage.entries.add(settings.questions.clone(), vec!["Not today".into()], Mood::Good)?;
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{NightlyError, NightlyResult};
