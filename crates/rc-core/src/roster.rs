use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::selection::SelectionSet;
use crate::student::{StudentId, StudentRecord};

/// The full list of students, fetched once and read-only afterwards.
///
/// Order is preserved as delivered by the endpoint. Lookups go through an
/// id index; when the same id appears twice, the first record wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StudentRecord>", into = "Vec<StudentRecord>")]
pub struct Roster {
    students: Vec<StudentRecord>,
    #[serde(skip)]
    index: HashMap<StudentId, usize>,
}

impl Roster {
    /// Build a roster from records in display order.
    pub fn new(students: Vec<StudentRecord>) -> Self {
        let mut index = HashMap::with_capacity(students.len());
        for (pos, student) in students.iter().enumerate() {
            index.entry(student.student_id).or_insert(pos);
        }
        Self { students, index }
    }

    /// Resolve an id to its record. Dangling ids resolve to `None`.
    pub fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.index.get(&id).map(|&pos| &self.students[pos])
    }

    /// Whether the roster has a record for `id`.
    pub fn contains(&self, id: StudentId) -> bool {
        self.index.contains_key(&id)
    }

    /// All records in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.students.iter()
    }

    /// Distinct ids in roster order. A repeated id is yielded once, at the
    /// position of the record that lookups resolve to.
    pub fn ids(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.students
            .iter()
            .enumerate()
            .filter(|(pos, s)| self.index.get(&s.student_id) == Some(pos))
            .map(|(_, s)| s.student_id)
    }

    /// Number of distinct ids.
    pub fn distinct_len(&self) -> usize {
        self.index.len()
    }

    /// Records whose id is in `selection`, in roster order.
    pub fn selected<'a>(&'a self, selection: &'a SelectionSet) -> impl Iterator<Item = &'a StudentRecord> {
        self.students
            .iter()
            .filter(|s| selection.contains(s.student_id))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster has no records.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl From<Vec<StudentRecord>> for Roster {
    fn from(students: Vec<StudentRecord>) -> Self {
        Self::new(students)
    }
}

impl From<Roster> for Vec<StudentRecord> {
    fn from(roster: Roster) -> Self {
        roster.students
    }
}

impl FromIterator<StudentRecord> for Roster {
    fn from_iter<I: IntoIterator<Item = StudentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(vec![
            StudentRecord::new(3, "C"),
            StudentRecord::new(1, "A"),
            StudentRecord::new(2, "B"),
        ])
    }

    #[test]
    fn lookup_by_id() {
        let r = roster();
        assert_eq!(r.get(StudentId(1)).map(|s| s.name.as_str()), Some("A"));
        assert!(r.get(StudentId(99)).is_none());
        assert!(r.contains(StudentId(2)));
        assert!(!r.contains(StudentId(4)));
    }

    #[test]
    fn preserves_order() {
        let ids: Vec<i64> = roster().ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_id_first_wins() {
        let r = Roster::new(vec![StudentRecord::new(1, "first"), StudentRecord::new(1, "second")]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get(StudentId(1)).map(|s| s.name.as_str()), Some("first"));
    }

    #[test]
    fn ids_skip_repeated_records() {
        let r = Roster::new(vec![
            StudentRecord::new(5, "a"),
            StudentRecord::new(1, "b"),
            StudentRecord::new(5, "c"),
            StudentRecord::new(2, "d"),
        ]);
        let ids: Vec<i64> = r.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![5, 1, 2]);
        assert_eq!(r.distinct_len(), 3);
    }

    #[test]
    fn selected_view_keeps_roster_order_and_skips_dangling() {
        let r = roster();
        let selection: SelectionSet = [StudentId(2), StudentId(3), StudentId(42)].into_iter().collect();
        let names: Vec<&str> = r.selected(&selection).map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
    }

    #[test]
    fn deserializes_from_json_array() {
        let json = r#"[
            {"student_id": 1, "name": "A", "thumbnail1": "a1", "thumbnail2": "a2"},
            {"student_id": 2, "name": "B", "thumbnail1": "b1", "thumbnail2": "b2"}
        ]"#;
        let r: Roster = serde_json::from_str(json).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.get(StudentId(2)).map(|s| s.thumbnail1.as_str()), Some("b1"));
    }

    #[test]
    fn json_roundtrip() {
        let r = roster();
        let json = serde_json::to_string(&r).unwrap();
        let r2: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(r, r2);
    }

    #[test]
    fn empty_roster() {
        let r = Roster::default();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert!(r.get(StudentId(1)).is_none());
    }
}
