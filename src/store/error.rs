//! Store-specific error types
//!
//! Errors raised while creating, deleting or persisting bookmarks.
//! A plain load degrades a missing or corrupt bookmark file to an empty
//! store; create and delete report the failure instead of rewriting it.

use std::io;
use thiserror::Error;

/// Errors that can occur during bookmark store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Alias contains characters outside `[\w-]`
    #[error("Invalid alias '{0}': only letters, digits, '_' and '-' are allowed")]
    InvalidAlias(String),

    /// No bookmark with the given id
    #[error("Bookmark '{0}' not found")]
    NotFound(String),

    /// I/O error while reading or writing the bookmark file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
