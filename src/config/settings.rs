//! User settings for the nightly journal
//!
//! Holds the prompt set used for new entries, the sobriety start date that
//! drives the streak counter, and display preferences. Every field carries a
//! serde default so settings files written by older versions keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::paths::NightlyPaths;
use crate::error::NightlyError;
use crate::models::questions::default_questions;
use crate::storage::file_io::write_json_atomic;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Reference date for the sobriety streak; `None` means unset
    #[serde(default)]
    pub sobriety_start: Option<DateTime<Utc>>,

    /// Prompts snapshotted into each new entry
    #[serde(default = "default_questions")]
    pub questions: Vec<String>,

    /// Date format preference for list views (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            sobriety_start: None,
            questions: default_questions(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &NightlyPaths) -> Result<Self, NightlyError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| NightlyError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| NightlyError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.questions.is_empty() {
            settings.questions = default_questions();
        }

        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file can't be used
    ///
    /// The load error is handed back so the caller can warn, and refuse to
    /// [`save`](Self::save) over a file it never managed to read.
    pub fn load_or_default(paths: &NightlyPaths) -> (Self, Option<NightlyError>) {
        match Self::load_or_create(paths) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &NightlyPaths) -> Result<(), NightlyError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
