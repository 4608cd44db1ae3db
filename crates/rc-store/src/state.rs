//! Typed access to the two persisted entries.
//!
//! Ids are stored in their string form. This module is the only place that
//! converts between `StudentId` and that form.

use rc_core::{SelectionSet, StudentId};
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::store::{EntryOptions, KeyValueStore};

/// Entry holding the selection as a JSON array of id strings.
pub const SELECTED_KEY: &str = "selectedStudents";

/// Entry holding the most recent single-pick result as an id string.
pub const LAST_SELECTED_KEY: &str = "lastSelectedStudent";

/// The selection and last pick, read from and written to a store.
#[derive(Debug, Clone)]
pub struct PersistedState<S> {
    store: S,
    options: EntryOptions,
}

impl<S: KeyValueStore> PersistedState<S> {
    /// Wrap a store, writing entries with the default far-future expiry.
    pub fn new(store: S) -> Self {
        Self::with_options(store, EntryOptions::default())
    }

    /// Wrap a store with explicit entry options.
    pub fn with_options(store: S, options: EntryOptions) -> Self {
        Self { store, options }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the persisted selection. Absent means empty.
    ///
    /// Elements that are not valid ids are skipped.
    pub fn load_selection(&self) -> StoreResult<SelectionSet> {
        let Some(raw) = self.store.get(SELECTED_KEY)? else {
            return Ok(SelectionSet::new());
        };
        let values: Vec<String> =
            serde_json::from_str(&raw).map_err(|e| StoreError::InvalidValue {
                key: SELECTED_KEY.to_string(),
                reason: e.to_string(),
            })?;

        Ok(values
            .iter()
            .filter_map(|value| match value.parse::<StudentId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(key = SELECTED_KEY, "skipping persisted entry: {e}");
                    None
                }
            })
            .collect())
    }

    /// Write the full selection.
    pub fn save_selection(&mut self, selection: &SelectionSet) -> StoreResult<()> {
        let values: Vec<String> = selection.iter().map(|id| id.to_string()).collect();
        let raw = serde_json::to_string(&values)?;
        self.store.set(SELECTED_KEY, &raw, &self.options)
    }

    /// Read the last picked id, if one was persisted and is valid.
    pub fn load_last_picked(&self) -> StoreResult<Option<StudentId>> {
        let Some(raw) = self.store.get(LAST_SELECTED_KEY)? else {
            return Ok(None);
        };
        match raw.parse::<StudentId>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                warn!(key = LAST_SELECTED_KEY, "ignoring persisted entry: {e}");
                Ok(None)
            }
        }
    }

    /// Write the last picked id.
    pub fn save_last_picked(&mut self, id: StudentId) -> StoreResult<()> {
        self.store
            .set(LAST_SELECTED_KEY, &id.to_string(), &self.options)
    }
}
