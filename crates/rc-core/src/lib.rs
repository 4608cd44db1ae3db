//! Core types for Rollcall: students, the roster, and the user's selection.
//!
//! The roster is fetched once and never mutated. The selection is the
//! user-curated subset considered available for picking. Neither type knows
//! how it is persisted; see `rc-store` for that boundary.

/// Error types used throughout the crate.
pub mod error;
/// The session-static list of students.
pub mod roster;
/// The set of students the user has marked as available.
pub mod selection;
/// Student records and identifiers.
pub mod student;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the roster.
pub use roster::Roster;
/// Re-export the selection set.
pub use selection::SelectionSet;
/// Re-export student types.
pub use student::{IMAGE_EXTENSION, StudentId, StudentRecord};
