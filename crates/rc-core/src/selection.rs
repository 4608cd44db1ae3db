use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::student::StudentId;

/// The students the user has marked as available for picking.
///
/// Membership is independent of the roster: ids of students that no longer
/// exist are kept and simply never resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    ids: BTreeSet<StudentId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns `true` if `id` is now selected.
    pub fn toggle(&mut self, id: StudentId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: StudentId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<StudentId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = StudentId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
