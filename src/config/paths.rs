//! Path management for the nightly journal
//!
//! ## Path Resolution Order
//!
//! 1. `NIGHTLY_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_DATA_HOME/nightly` or `~/.local/share/nightly`
//! 3. Windows: `%APPDATA%\nightly`

use std::path::PathBuf;

use crate::error::NightlyError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "NIGHTLY_DATA_DIR";

/// Name of the persisted entry document
pub const ENTRIES_FILE_NAME: &str = "nightly_entries.json";

/// Manages all paths used by the journal
#[derive(Debug, Clone)]
pub struct NightlyPaths {
    base_dir: PathBuf,
}

impl NightlyPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application data directory can be
    /// determined.
    pub fn new() -> Result<Self, NightlyError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the entry document
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the entry document
    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join(ENTRIES_FILE_NAME)
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), NightlyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| NightlyError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| NightlyError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, NightlyError> {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        if !data_home.is_empty() {
            return Ok(PathBuf::from(data_home).join("nightly"));
        }
    }

    let home = std::env::var("HOME")
        .map_err(|_| NightlyError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("nightly"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, NightlyError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| NightlyError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("nightly"))
}
