//! JSON-file-backed store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{EntryOptions, KeyValueStore, StoredEntry};

/// A store persisted as a single JSON object on disk.
///
/// The whole file is rewritten on every mutation. A missing file is an
/// empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredEntry>,
}

impl FileStore {
    /// Open the store at `path`, reading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), entries = entries.len(), "opened state file");
        Ok(Self { path, entries })
    }

    /// Open the store at `path`, starting empty if the file is not valid JSON.
    ///
    /// The unreadable file is moved aside to `<name>.bak` before the next
    /// write replaces it. I/O errors other than a missing file still fail.
    pub fn open_or_recover(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        match Self::open(&path) {
            Err(StoreError::Json(e)) => {
                let backup = backup_path(&path);
                match fs::rename(&path, &backup) {
                    Ok(()) => warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        "state file is not valid JSON, starting with an empty state: {e}"
                    ),
                    Err(rename) => warn!(
                        path = %path.display(),
                        "state file is not valid JSON, starting with an empty state: {e} (not backed up: {rename})"
                    ),
                }
                Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                })
            }
            other => other,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

impl KeyValueStore for FileStore {
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
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v", &EntryOptions::default()).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v", &EntryOptions::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_records_expiry_and_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v", &EntryOptions::default()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["k"]["value"], "v");
        assert_eq!(raw["k"]["path"], "/");
        assert!(raw["k"]["expires"].as_str().unwrap().starts_with("2038-01-19T03:14:07"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::Json(_))));
    }

    #[test]
    fn corrupt_file_is_moved_aside_on_recover() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open_or_recover(&path).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert_eq!(
            fs::read_to_string(dir.path().join("state.json.bak")).unwrap(),
            "{ not json"
        );

        store.set("k", "v", &EntryOptions::default()).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn recover_keeps_valid_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        FileStore::open(&path)
            .unwrap()
            .set("k", "v", &EntryOptions::default())
            .unwrap();

        let store = FileStore::open_or_recover(&path).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        assert!(!dir.path().join("state.json.bak").exists());
    }

    #[test]
    fn empty_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v", &EntryOptions::default()).unwrap();
        store.remove("k").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), None);
    }
}
