//! Key-value store trait and the in-memory implementation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Unix second 2147483647, i.e. 2038-01-19T03:14:07Z.
const FAR_FUTURE_SECS: i64 = i32::MAX as i64;

/// Expiry and scope attached to every written entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOptions {
    /// Instant after which the entry reads as absent.
    pub expires: DateTime<Utc>,
    /// Path scope of the entry.
    pub path: String,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            expires: DateTime::from_timestamp(FAR_FUTURE_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC),
            path: "/".to_string(),
        }
    }
}

impl EntryOptions {
    /// Set the expiry instant.
    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = expires;
        self
    }

    /// Set the path scope.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// A single persisted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// The raw string value.
    pub value: String,
    /// Expiry instant.
    pub expires: DateTime<Utc>,
    /// Path scope.
    pub path: String,
}

impl StoredEntry {
    /// Build an entry from a value and its options.
    pub fn new(value: impl Into<String>, options: &EntryOptions) -> Self {
        Self {
            value: value.into(),
            expires: options.expires,
            path: options.path.clone(),
        }
    }

    /// Whether the entry is still valid at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

/// Named string storage that survives across sessions.
pub trait KeyValueStore {
    /// Read a live entry. Expired or missing entries read as `None`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write an entry, replacing any previous value.
    fn set(&mut self, key: &str, value: &str, options: &EntryOptions) -> StoreResult<()>;

    /// Delete an entry. Deleting a missing entry is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, StoredEntry>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry access, including expired entries.
    pub fn entry(&self, key: &str) -> Option<&StoredEntry> {
        self.entries.get(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = Utc::now();
        Ok(self
            .entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, options: &EntryOptions) -> StoreResult<()> {
        self.entries
            .insert(key.to_string(), StoredEntry::new(value, options));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
