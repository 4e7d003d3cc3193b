//! Strongly-typed entry identifier
//!
//! Entries are keyed by a random UUID assigned once at creation. The newtype
//! keeps entry ids from being confused with any other UUID in the program.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix used when displaying short entry ids
pub const ENTRY_ID_PREFIX: &str = "ent-";

/// Unique identifier of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a full UUID string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Short form shown in lists, e.g. `ent-550e8400`
    pub fn short(&self) -> String {
        format!("{}{}", ENTRY_ID_PREFIX, &self.0.simple().to_string()[..8])
    }

    /// Whether user-typed text identifies this id
    ///
    /// Accepts the short form, the full UUID, or any leading part of the
    /// hyphenated UUID, all case-insensitive.
    pub fn matches_prefix(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        let text = text.strip_prefix(ENTRY_ID_PREFIX).unwrap_or(&text);
        if text.is_empty() {
            return false;
        }
        self.0.hyphenated().to_string().starts_with(text)
            || self.0.simple().to_string().starts_with(text)
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(ENTRY_ID_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
