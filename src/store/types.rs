//! Bookmark record type, id generation and alias validation

use super::error::StoreError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of hex characters kept from the id digest
pub const ID_LEN: usize = 12;

static ALIAS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w-]+$").expect("alias pattern is a valid regex"));

/// A saved directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkRecord {
    /// Opaque, immutable token assigned at creation
    pub id: String,
    /// Display name, defaults to the id
    pub alias: String,
    /// Absolute path captured when the bookmark was saved
    pub path: PathBuf,
    /// Seconds since the Unix epoch
    pub created_at: i64,
}

impl BookmarkRecord {
    /// Create a record from its parts
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        alias: impl Into<String>,
        path: impl Into<PathBuf>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            alias: alias.into(),
            path: path.into(),
            created_at,
        }
    }

    /// Path as a display string
    #[must_use]
    pub fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// Whether the alias or the id starts with `prefix`
    #[must_use]
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.alias.starts_with(prefix) || self.id.starts_with(prefix)
    }
}

/// On-disk shape of a record; the id lives in the enclosing map key
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredRecord {
    pub path: PathBuf,
    pub alias: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: i64,
}

impl StoredRecord {
    pub(crate) fn into_record(self, id: String) -> BookmarkRecord {
        BookmarkRecord {
            id,
            alias: self.alias,
            path: self.path,
            created_at: self.created_at,
        }
    }
}

impl From<&BookmarkRecord> for StoredRecord {
    fn from(record: &BookmarkRecord) -> Self {
        Self {
            path: record.path.clone(),
            alias: record.alias.clone(),
            created_at: record.created_at,
        }
    }
}

/// Older bookmark files store fractional timestamps; keep the whole seconds.
#[allow(clippy::cast_possible_truncation)]
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|secs| secs.trunc() as i64))
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {number}")))
}

/// Check an alias against the allowed character set (`^[\w-]+$`)
///
/// # Errors
///
/// Returns `StoreError::InvalidAlias` if the alias is empty or contains
/// anything other than word characters and dashes.
pub fn validate_alias(alias: &str) -> Result<(), StoreError> {
    if ALIAS_PATTERN.is_match(alias) {
        Ok(())
    } else {
        Err(StoreError::InvalidAlias(alias.to_string()))
    }
}

/// Generate a fresh bookmark id
///
/// Hashes the current time in nanoseconds together with random bytes and
/// keeps the first [`ID_LEN`] hex characters.
#[must_use]
pub fn generate_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let salt: [u8; 16] = std::array::from_fn(|_| fastrand::u8(..));

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(salt);
    let digest = hasher.finalize();

    digest
        .iter()
        .take(ID_LEN / 2)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Current time in whole seconds since the Unix epoch
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn now_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_alias() {
        assert!(validate_alias("proj").is_ok());
        assert!(validate_alias("my-project_2").is_ok());
        assert!(validate_alias("Ünïcode").is_ok());

        assert!(validate_alias("").is_err());
        assert!(validate_alias("has space").is_err());
        assert!(validate_alias("slash/inside").is_err());
        assert!(validate_alias("dot.name").is_err());
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_id_unique() {
        let ids: std::collections::HashSet<String> = (0..200).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_matches_prefix() {
        let record = BookmarkRecord::new("a1b2c3d4e5f6", "proj", "/home/u/proj", 1_700_000_000);
        assert!(record.matches_prefix("pro"));
        assert!(record.matches_prefix("a1b2"));
        assert!(!record.matches_prefix("roj"));
    }

    #[test]
    fn test_stored_record_accepts_float_timestamp() {
        let stored: StoredRecord =
            serde_json::from_str(r#"{"path": "/tmp", "alias": "t", "created_at": 1700000000.75}"#)
                .unwrap();
        assert_eq!(stored.created_at, 1_700_000_000);
    }

    #[test]
    fn test_stored_record_rejects_string_timestamp() {
        let result: Result<StoredRecord, _> =
            serde_json::from_str(r#"{"path": "/tmp", "alias": "t", "created_at": "yesterday"}"#);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_word_aliases_are_valid(alias in "[A-Za-z0-9_-]{1,32}") {
            prop_assert!(validate_alias(&alias).is_ok());
        }

        #[test]
        fn prop_aliases_with_forbidden_chars_are_invalid(
            prefix in "[a-z]{0,8}",
            bad in "[ ./:@!#$%^&*()+=]",
            suffix in "[a-z]{0,8}",
        ) {
            let alias = format!("{prefix}{bad}{suffix}");
            prop_assert!(validate_alias(&alias).is_err());
        }
    }
}
