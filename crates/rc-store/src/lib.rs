//! Persistence adapter for Rollcall.
//!
//! Stores named string entries with an expiry and a path scope, in the
//! manner of browser cookies, and converts the selection and last pick to
//! and from their persisted string form. Identifier parsing happens here
//! and nowhere else.

pub mod error;
pub mod file;
pub mod state;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use state::{LAST_SELECTED_KEY, PersistedState, SELECTED_KEY};
pub use store::{EntryOptions, KeyValueStore, MemoryStore, StoredEntry};
