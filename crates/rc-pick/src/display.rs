//! Result display state machine.

use rc_core::StudentRecord;

/// The outcome of a successful pick, held only while it is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    /// One student, from a single-pick mode.
    Single(StudentRecord),
    /// Several distinct students, from a multi-pick mode, in draw order.
    Multi(Vec<StudentRecord>),
}

impl PickResult {
    /// The picked students in display order.
    pub fn students(&self) -> &[StudentRecord] {
        match self {
            Self::Single(s) => std::slice::from_ref(s),
            Self::Multi(list) => list,
        }
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.students().is_empty()
    }
}

/// Whether the result modal is showing, and what.
///
/// Every pick replaces the content outright; closing discards it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultDisplay {
    /// No modal.
    #[default]
    Closed,
    /// Modal showing a pick result.
    Open(PickResult),
}

impl ResultDisplay {
    /// Show `result`, replacing anything already shown.
    pub fn open(&mut self, result: PickResult) {
        *self = Self::Open(result);
    }

    /// Dismiss the modal.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Whether the modal is showing.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// The displayed result, if open.
    pub fn result(&self) -> Option<&PickResult> {
        match self {
            Self::Open(r) => Some(r),
            Self::Closed => None,
        }
    }
}
