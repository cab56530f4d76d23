//! Testing utilities for twd
//!
//! This module provides helper types for writing tests, including a
//! `TestStore` wrapper for temporary bookmark files.
//!
//! Only available when compiled with `cfg(test)`.

use crate::store::{BookmarkRecord, BookmarkStore, Bookmarks};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Bookmark store backed by a file in a temporary directory
///
/// The directory and everything in it is removed when the wrapper goes out
/// of scope, so tests don't leave artifacts behind.
///
/// # Examples
/// ```ignore
/// let test_store = TestStore::new();
/// let id = test_store.store().create(Path::new("/tmp"), Some("tmp")).unwrap();
/// assert_eq!(test_store.store().load().len(), 1);
/// ```
pub struct TestStore {
    dir: TempDir,
    store: BookmarkStore,
}

impl TestStore {
    /// Create an empty store; the bookmark file does not exist yet
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir for test store");
        let store = BookmarkStore::new(dir.path().join("bookmarks.json"));
        Self { dir, store }
    }

    /// Create a store whose file already holds `records`, in order
    ///
    /// # Panics
    /// Panics if the bookmark file cannot be written.
    #[must_use]
    pub fn with_records(records: &[BookmarkRecord]) -> Self {
        let test_store = Self::new();
        let bookmarks: Bookmarks = records.iter().cloned().collect();
        let json = serde_json::to_string_pretty(&bookmarks).expect("Failed to serialize bookmarks");
        fs::write(test_store.store.path(), json).expect("Failed to write bookmark file");
        test_store
    }

    /// Get a reference to the underlying store
    #[must_use]
    pub const fn store(&self) -> &BookmarkStore {
        &self.store
    }

    /// Directory holding the bookmark file
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_basic() {
        let test_store = TestStore::new();
        assert!(test_store.store().load().is_empty());
        assert!(test_store.store().path().starts_with(test_store.dir()));
    }

    #[test]
    fn test_store_with_records() {
        let test_store = TestStore::with_records(&[
            BookmarkRecord::new("000000000001", "a", "/a", 1),
            BookmarkRecord::new("000000000002", "b", "/b", 2),
        ]);
        assert_eq!(test_store.store().load().len(), 2);
    }

    #[test]
    fn test_store_cleanup() {
        let dir = {
            let test_store = TestStore::with_records(&[BookmarkRecord::new("x", "x", "/x", 0)]);
            test_store.dir().to_path_buf()
        };
        assert!(!dir.exists());
    }
}
