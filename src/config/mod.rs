//! Configuration module for the nightly journal
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::NightlyPaths;
pub use settings::Settings;
