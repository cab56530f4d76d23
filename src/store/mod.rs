//! Bookmark store
//!
//! Persists the `id -> record` mapping as a single pretty-printed JSON
//! object and provides create, delete and prefix resolution on top of it.
//!
//! Every mutation reads the whole file, changes an in-memory copy and
//! rewrites the whole file (write to a temporary sibling, then rename).
//! Two processes mutating the store concurrently race; the last writer wins.
//!
//! # Examples
//!
//! ```no_run
//! use twd::store::{BookmarkStore, Resolution};
//! use std::path::{Path, PathBuf};
//!
//! let store = BookmarkStore::new(PathBuf::from("bookmarks.json"));
//! let id = store.create(Path::new("/home/u/proj"), Some("proj")).unwrap();
//!
//! match store.resolve("pro") {
//!     Resolution::Unique(record) => println!("{} -> {}", record.alias, record.path.display()),
//!     Resolution::Ambiguous(records) => println!("{} candidates", records.len()),
//!     Resolution::None => println!("no match for {id}"),
//! }
//! ```

pub mod error;
pub mod types;

pub use error::StoreError;
pub use types::{BookmarkRecord, ID_LEN, generate_id, validate_alias};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use types::StoredRecord;

/// Ordered collection of bookmarks keyed by id
///
/// Keeps file order so the default (unsorted) iteration order matches what
/// is on disk. Serializes as a JSON object `id -> {path, alias, created_at}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmarks {
    records: Vec<BookmarkRecord>,
}

impl Bookmarks {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of bookmarks
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no bookmarks
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a bookmark by exact id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BookmarkRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Whether a bookmark with this id exists
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Insert a record, replacing any record with the same id in place
    pub fn insert(&mut self, record: BookmarkRecord) {
        if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        } else {
            self.records.push(record);
        }
    }

    /// Remove a record by id
    pub fn remove(&mut self, id: &str) -> Option<BookmarkRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Iterate in store order
    pub fn iter(&self) -> std::slice::Iter<'_, BookmarkRecord> {
        self.records.iter()
    }

    /// Borrow the records in store order
    #[must_use]
    pub fn as_slice(&self) -> &[BookmarkRecord] {
        &self.records
    }

    /// Consume into a vector in store order
    #[must_use]
    pub fn into_vec(self) -> Vec<BookmarkRecord> {
        self.records
    }

    /// Resolve a query against aliases and ids by prefix
    ///
    /// A record matches when its alias or its id starts with `query`; a
    /// record matching on both counts once. An empty query never matches.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Resolution {
        if query.is_empty() {
            return Resolution::None;
        }

        let mut matches: Vec<BookmarkRecord> = self
            .records
            .iter()
            .filter(|r| r.matches_prefix(query))
            .cloned()
            .collect();

        match matches.len() {
            0 => Resolution::None,
            1 => Resolution::Unique(matches.remove(0)),
            _ => Resolution::Ambiguous(matches),
        }
    }
}

impl<'a> IntoIterator for &'a Bookmarks {
    type Item = &'a BookmarkRecord;
    type IntoIter = std::slice::Iter<'a, BookmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<BookmarkRecord> for Bookmarks {
    fn from_iter<I: IntoIterator<Item = BookmarkRecord>>(iter: I) -> Self {
        let mut bookmarks = Self::new();
        for record in iter {
            bookmarks.insert(record);
        }
        bookmarks
    }
}

impl Serialize for Bookmarks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.id, &StoredRecord::from(record))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Bookmarks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BookmarksVisitor;

        impl<'de> Visitor<'de> for BookmarksVisitor {
            type Value = Bookmarks;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of bookmark id to bookmark record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Bookmarks, A::Error> {
                let mut bookmarks = Bookmarks::new();
                // The key is authoritative for the id.
                while let Some((id, stored)) = access.next_entry::<String, StoredRecord>()? {
                    bookmarks.insert(stored.into_record(id));
                }
                Ok(bookmarks)
            }
        }

        deserializer.deserialize_map(BookmarksVisitor)
    }
}

/// Outcome of resolving a query against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing matched
    None,
    /// Exactly one bookmark matched
    Unique(BookmarkRecord),
    /// Several bookmarks matched; the caller must let the user choose
    Ambiguous(Vec<BookmarkRecord>),
}

/// File-backed bookmark store
///
/// Encapsulates the path of the bookmark file. Each call re-reads the file so
/// that changes made by other invocations are picked up.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
    auto_backup: bool,
}

impl BookmarkStore {
    /// Create a store backed by `path`
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: true,
        }
    }

    /// Create a store that does not keep a `.backup` copy on rewrite
    #[must_use]
    pub const fn without_backup(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: false,
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all bookmarks
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; mutations refuse to run on it.
    #[must_use]
    pub fn load(&self) -> Bookmarks {
        match self.try_load() {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "bookmark file unusable, treating as empty");
                Bookmarks::new()
            }
        }
    }

    fn try_load(&self) -> Result<Bookmarks, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Bookmarks::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Bookmarks::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Rewrite the whole file
    ///
    /// Creates the parent directory if needed and keeps a `.backup` copy of
    /// the previous file when `auto_backup` is enabled.
    fn save(&self, bookmarks: &Bookmarks) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if self.auto_backup && self.path.exists() {
            fs::copy(&self.path, self.path.with_extension("json.backup"))?;
        }

        let json = serde_json::to_string_pretty(bookmarks)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Bookmark a directory
    ///
    /// The alias defaults to the generated id. The path is made absolute
    /// against the current working directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - The alias contains invalid characters (nothing is written)
    /// - The path cannot be made absolute
    /// - The existing bookmark file cannot be read or parsed (it is left untouched)
    /// - The bookmark file cannot be written
    pub fn create(&self, path: &Path, alias: Option<&str>) -> Result<String, StoreError> {
        if let Some(alias) = alias {
            validate_alias(alias)?;
        }

        let path = std::path::absolute(path)?;
        let mut bookmarks = self.try_load()?;

        let mut id = generate_id();
        while bookmarks.contains(&id) {
            id = generate_id();
        }

        let alias = alias.map_or_else(|| id.clone(), str::to_string);
        let record = BookmarkRecord::new(id.clone(), alias, path, types::now_timestamp());

        tracing::info!(id = %record.id, alias = %record.alias, path = %record.path.display(), "bookmark created");
        bookmarks.insert(record);
        self.save(&bookmarks)?;

        Ok(id)
    }

    /// Delete a bookmark by id
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - No bookmark has this id (for example, another process removed it)
    /// - The existing bookmark file cannot be read or parsed (it is left untouched)
    /// - The bookmark file cannot be written
    pub fn delete(&self, id: &str) -> Result<BookmarkRecord, StoreError> {
        let mut bookmarks = self.try_load()?;

        let removed = bookmarks
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        self.save(&bookmarks)?;
        tracing::info!(id, alias = %removed.alias, "bookmark deleted");

        Ok(removed)
    }

    /// Get a bookmark by exact id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<BookmarkRecord> {
        self.load().get(id).cloned()
    }

    /// Resolve a query by alias or id prefix
    #[must_use]
    pub fn resolve(&self, query: &str) -> Resolution {
        self.load().resolve(query)
    }
}
