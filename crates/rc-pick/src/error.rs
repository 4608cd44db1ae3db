//! Error types for the pick engine.

use thiserror::Error;

/// Result type for pick operations.
pub type EngineResult<T> = Result<T, PickError>;

/// Reasons a pick request is rejected. None of them mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    /// A multi-pick asked for zero students.
    #[error("pick count must be at least 1")]
    ZeroCount,

    /// A multi-pick from the selection with nothing selected.
    #[error("no students selected")]
    NoneSelected,

    /// A multi-pick from the selection asked for more than are selected.
    #[error("only {selected} students selected, but {requested} requested")]
    NotEnoughSelected {
        /// Size of the selection.
        selected: usize,
        /// Requested pick count.
        requested: usize,
    },

    /// A roster-wide pick with an empty roster.
    #[error("the roster is empty")]
    EmptyRoster,

    /// The roster is still loading or failed to load.
    #[error("the roster is not available")]
    RosterUnavailable,
}
