//! Custom error types for the nightly journal
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for journal operations
#[derive(Error, Debug)]
pub enum NightlyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The entry document exists but is not a valid entry list
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    /// Persisting the entry document did not complete
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// Internal storage errors (lock poisoning and the like)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl NightlyError {
    /// Create a "not found" error for entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a corrupt document error
    pub fn is_corrupt_document(&self) -> bool {
        matches!(self, Self::CorruptDocument(_))
    }

    /// Check if this is a write failure
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::WriteFailure(_))
    }
}

impl From<std::io::Error> for NightlyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NightlyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for journal operations
pub type NightlyResult<T> = Result<T, NightlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NightlyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = NightlyError::entry_not_found("ent-1234abcd");
        assert_eq!(err.to_string(), "Entry not found: ent-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_write_failure());
    }

    #[test]
    fn test_document_errors() {
        let corrupt = NightlyError::CorruptDocument("expected an array".into());
        assert!(corrupt.is_corrupt_document());
        assert_eq!(corrupt.to_string(), "Corrupt document: expected an array");

        let write = NightlyError::WriteFailure("disk full".into());
        assert!(write.is_write_failure());
        assert!(!write.is_corrupt_document());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NightlyError = io_err.into();
        assert!(matches!(err, NightlyError::Io(_)));
    }
}
