//! Storage layer for the nightly journal
//!
//! Provides the entry document codec, atomic file writes, and the entry
//! store that owns the canonical list of entries.

pub mod codec;
pub mod entries;
pub mod events;
pub mod file_io;

pub use entries::{EntryStore, LoadOutcome};
pub use events::StoreChange;
pub use file_io::write_json_atomic;

use crate::config::paths::NightlyPaths;
use crate::error::NightlyError;

/// Storage coordinator; construct one per process and pass it to consumers
pub struct Storage {
    paths: NightlyPaths,
    pub entries: EntryStore,
}

impl Storage {
    /// Create the storage layer, making sure its directories exist
    pub fn new(paths: NightlyPaths) -> Result<Self, NightlyError> {
        paths.ensure_directories()?;

        Ok(Self {
            entries: EntryStore::new(paths.entries_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &NightlyPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<LoadOutcome, NightlyError> {
        self.entries.load()
    }
}
