//! Picker session state.
//!
//! `PickerSession` owns everything a frontend mutates: the roster status,
//! the selection, the last pick, the result display, and the view filter.
//! Every mutation of the selection or the last pick is written through to
//! the store immediately. Write failures never undo the in-memory change;
//! they are logged and kept for the frontend to show.

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use rc_core::{Roster, SelectionSet, StudentId, StudentRecord};
use rc_store::{KeyValueStore, PersistedState, StoreError};

use crate::config::PickerConfig;
use crate::display::{PickResult, ResultDisplay};
use crate::engine;
use crate::error::{EngineResult, PickError};

/// Loading state of the roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RosterStatus {
    /// The fetch has not completed yet.
    #[default]
    Loading,
    /// The roster is available.
    Ready(Roster),
    /// The fetch failed; picking is disabled until the next start.
    Failed(String),
}

/// What a pick action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSignal {
    /// Nothing to pick; no state changed and the display stays as it was.
    NoOp,
    /// The result display was opened with a new result.
    Opened,
    /// The result display was opened, but the request was clamped.
    OpenedClamped {
        /// Requested pick count.
        requested: usize,
        /// Number of students actually available.
        available: usize,
    },
}

/// An interactive picking session.
pub struct PickerSession<S> {
    roster: RosterStatus,
    selection: SelectionSet,
    last_picked: Option<StudentId>,
    display: ResultDisplay,
    show_selected: bool,
    persisted: PersistedState<S>,
    persist_error: Option<String>,
    rng: StdRng,
}

impl<S: KeyValueStore> PickerSession<S> {
    /// Start a session, restoring the selection and last pick from `store`.
    ///
    /// Unreadable persisted state is logged and treated as empty.
    pub fn new(store: S, config: PickerConfig) -> Self {
        let persisted = PersistedState::new(store);
        let selection = persisted.load_selection().unwrap_or_else(|e| {
            warn!("could not restore selection: {e}");
            SelectionSet::new()
        });
        let last_picked = persisted.load_last_picked().unwrap_or_else(|e| {
            warn!("could not restore last pick: {e}");
            None
        });
        debug!(
            selected = selection.len(),
            last = ?last_picked,
            "restored session state"
        );

        Self {
            roster: RosterStatus::Loading,
            selection,
            last_picked,
            display: ResultDisplay::Closed,
            show_selected: false,
            persisted,
            persist_error: None,
            rng: config.rng(),
        }
    }

    /// Install the fetched roster.
    pub fn roster_loaded(&mut self, roster: Roster) {
        info!(students = roster.len(), "roster loaded");
        self.roster = RosterStatus::Ready(roster);
    }

    /// Record that the roster could not be fetched.
    pub fn roster_failed(&mut self, message: impl Into<String>) {
        self.roster = RosterStatus::Failed(message.into());
    }

    /// Current roster status.
    pub fn roster_status(&self) -> &RosterStatus {
        &self.roster
    }

    /// The roster, if loaded.
    pub fn roster(&self) -> Option<&Roster> {
        match &self.roster {
            RosterStatus::Ready(r) => Some(r),
            _ => None,
        }
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The most recent single-pick result.
    pub fn last_picked(&self) -> Option<StudentId> {
        self.last_picked
    }

    /// The result display.
    pub fn display(&self) -> &ResultDisplay {
        &self.display
    }

    /// Whether only selected students are shown.
    pub fn show_selected(&self) -> bool {
        self.show_selected
    }

    /// The most recent persistence failure, if any.
    pub fn persist_error(&self) -> Option<&str> {
        self.persist_error.as_deref()
    }

    /// The persisted state wrapper.
    pub fn persisted(&self) -> &PersistedState<S> {
        &self.persisted
    }

    /// Flip the "show selected only" view.
    pub fn toggle_view(&mut self) {
        self.show_selected = !self.show_selected;
    }

    /// Students visible under the current view, in roster order.
    pub fn visible_students(&self) -> Vec<&StudentRecord> {
        match self.roster() {
            Some(r) if self.show_selected => r.selected(&self.selection).collect(),
            Some(r) => r.iter().collect(),
            None => Vec::new(),
        }
    }

    /// Flip membership of `id` and persist the full selection.
    ///
    /// Returns `true` if `id` is now selected.
    pub fn toggle(&mut self, id: StudentId) -> EngineResult<bool> {
        if self.roster().is_none() {
            return Err(PickError::RosterUnavailable);
        }
        let selected = self.selection.toggle(id);
        debug!(%id, selected, "toggled student");
        let result = self.persisted.save_selection(&self.selection);
        self.record_persist(result);
        Ok(selected)
    }

    /// Pick one selected student, avoiding the previous single pick.
    pub fn pick_one(&mut self) -> EngineResult<PickSignal> {
        let RosterStatus::Ready(roster) = &self.roster else {
            return Err(PickError::RosterUnavailable);
        };
        let picked =
            engine::pick_one(roster, &self.selection, self.last_picked, &mut self.rng).cloned();
        match picked {
            Some(student) => Ok(self.open_single(student)),
            None => {
                debug!("nothing to pick from selection");
                Ok(PickSignal::NoOp)
            }
        }
    }

    /// Pick `count` distinct selected students.
    pub fn pick_many(&mut self, count: usize) -> EngineResult<PickSignal> {
        let RosterStatus::Ready(roster) = &self.roster else {
            return Err(PickError::RosterUnavailable);
        };
        let picked: Vec<StudentRecord> =
            engine::pick_many(roster, &self.selection, count, &mut self.rng)?
                .into_iter()
                .cloned()
                .collect();
        debug!(count, picked = picked.len(), "picked from selection");
        self.display.open(PickResult::Multi(picked));
        Ok(PickSignal::Opened)
    }

    /// Pick one student from the whole roster.
    pub fn pick_one_from_all(&mut self) -> EngineResult<PickSignal> {
        let RosterStatus::Ready(roster) = &self.roster else {
            return Err(PickError::RosterUnavailable);
        };
        let student = engine::pick_one_from_all(roster, &mut self.rng)?.clone();
        Ok(self.open_single(student))
    }

    /// Pick `count` distinct students from the whole roster.
    pub fn pick_many_from_all(&mut self, count: usize) -> EngineResult<PickSignal> {
        let RosterStatus::Ready(roster) = &self.roster else {
            return Err(PickError::RosterUnavailable);
        };
        let sample = engine::pick_many_from_all(roster, count, &mut self.rng)?;
        let clamped = sample.clamped;
        let picked: Vec<StudentRecord> = sample.students.into_iter().cloned().collect();
        debug!(count, picked = picked.len(), "picked from roster");
        self.display.open(PickResult::Multi(picked));
        Ok(match clamped {
            Some((requested, available)) => PickSignal::OpenedClamped {
                requested,
                available,
            },
            None => PickSignal::Opened,
        })
    }

    /// Dismiss the result display.
    pub fn close_display(&mut self) {
        self.display.close();
    }

    fn open_single(&mut self, student: StudentRecord) -> PickSignal {
        debug!(id = %student.student_id, "picked single student");
        let id = student.student_id;
        self.last_picked = Some(id);
        let result = self.persisted.save_last_picked(id);
        self.record_persist(result);
        self.display.open(PickResult::Single(student));
        PickSignal::Opened
    }

    fn record_persist(&mut self, result: Result<(), StoreError>) {
        match result {
            Ok(()) => self.persist_error = None,
            Err(e) => {
                warn!("failed to persist state: {e}");
                self.persist_error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_store::{EntryOptions, LAST_SELECTED_KEY, MemoryStore, SELECTED_KEY, StoreResult};
    use std::collections::HashSet;

    fn abc() -> Roster {
        Roster::new(vec![
            StudentRecord::new(1, "A"),
            StudentRecord::new(2, "B"),
            StudentRecord::new(3, "C"),
        ])
    }

    fn session_with(roster: Roster) -> PickerSession<MemoryStore> {
        let mut s = PickerSession::new(MemoryStore::new(), PickerConfig::default().with_seed(42));
        s.roster_loaded(roster);
        s
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str, _options: &EntryOptions) -> StoreResult<()> {
            Err(StoreError::InvalidValue {
                key: key.to_string(),
                reason: "read-only".to_string(),
            })
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn restores_persisted_state() {
        let mut store = MemoryStore::new();
        let opts = EntryOptions::default();
        store.set(SELECTED_KEY, r#"["1","3"]"#, &opts).unwrap();
        store.set(LAST_SELECTED_KEY, "3", &opts).unwrap();

        let s = PickerSession::new(store, PickerConfig::default());
        assert_eq!(s.selection().len(), 2);
        assert!(s.selection().contains(StudentId(3)));
        assert_eq!(s.last_picked(), Some(StudentId(3)));
        assert_eq!(s.roster_status(), &RosterStatus::Loading);
    }

    #[test]
    fn corrupt_persisted_selection_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store
            .set(SELECTED_KEY, "not json", &EntryOptions::default())
            .unwrap();
        let s = PickerSession::new(store, PickerConfig::default());
        assert!(s.selection().is_empty());
    }

    #[test]
    fn toggle_persists_selection() {
        let mut s = session_with(abc());
        assert_eq!(s.toggle(StudentId(2)), Ok(true));
        assert_eq!(
            s.persisted().store().get(SELECTED_KEY).unwrap(),
            Some(r#"["2"]"#.to_string())
        );
        assert_eq!(s.toggle(StudentId(2)), Ok(false));
        assert_eq!(
            s.persisted().store().get(SELECTED_KEY).unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn toggle_tolerates_unknown_ids() {
        let mut s = session_with(abc());
        assert_eq!(s.toggle(StudentId(404)), Ok(true));
        assert!(s.selection().contains(StudentId(404)));
    }

    #[test]
    fn actions_require_loaded_roster() {
        let mut s = PickerSession::new(MemoryStore::new(), PickerConfig::default());
        assert_eq!(s.toggle(StudentId(1)), Err(PickError::RosterUnavailable));
        assert_eq!(s.pick_one(), Err(PickError::RosterUnavailable));

        s.roster_failed("Failed to fetch students.");
        assert_eq!(s.pick_many(2), Err(PickError::RosterUnavailable));
        assert_eq!(s.pick_one_from_all(), Err(PickError::RosterUnavailable));
        assert_eq!(s.pick_many_from_all(2), Err(PickError::RosterUnavailable));
        assert!(s.visible_students().is_empty());
    }

    #[test]
    fn pick_one_draws_from_others_and_records_last() {
        let mut s = session_with(abc());
        for id in 1..=3 {
            s.toggle(StudentId(id)).unwrap();
        }

        let mut seen = HashSet::new();
        for _ in 0..50 {
            // Re-anchor the last pick so every draw is against last = 1.
            s.last_picked = Some(StudentId(1));
            assert_eq!(s.pick_one(), Ok(PickSignal::Opened));
            let Some(PickResult::Single(student)) = s.display().result() else {
                panic!("expected a single result");
            };
            seen.insert(student.student_id.0);
            assert_eq!(s.last_picked(), Some(student.student_id));
        }
        assert_eq!(seen, HashSet::from([2, 3]));
        assert!(s.persisted().load_last_picked().unwrap().is_some());
    }

    #[test]
    fn consecutive_single_picks_never_repeat() {
        let mut s = session_with(abc());
        s.toggle(StudentId(1)).unwrap();
        s.toggle(StudentId(2)).unwrap();
        let mut previous = None;
        for _ in 0..30 {
            s.pick_one().unwrap();
            let current = s.last_picked();
            assert_ne!(current, previous);
            previous = current;
        }
    }

    #[test]
    fn pick_one_with_empty_selection_is_noop() {
        let mut s = session_with(abc());
        assert_eq!(s.pick_one(), Ok(PickSignal::NoOp));
        assert!(!s.display().is_open());
        assert_eq!(s.last_picked(), None);
    }

    #[test]
    fn pick_one_dangling_selection_is_noop() {
        let mut s = session_with(abc());
        s.toggle(StudentId(99)).unwrap();
        assert_eq!(s.pick_one(), Ok(PickSignal::NoOp));
        assert!(!s.display().is_open());
    }

    #[test]
    fn pick_many_rejection_changes_nothing() {
        let mut s = session_with(abc());
        s.toggle(StudentId(1)).unwrap();
        let before_selection = s.selection().clone();
        assert_eq!(
            s.pick_many(2),
            Err(PickError::NotEnoughSelected {
                selected: 1,
                requested: 2
            })
        );
        assert_eq!(s.selection(), &before_selection);
        assert!(!s.display().is_open());
        assert_eq!(s.last_picked(), None);
    }

    #[test]
    fn pick_many_does_not_touch_last_pick() {
        let mut s = session_with(abc());
        for id in 1..=3 {
            s.toggle(StudentId(id)).unwrap();
        }
        assert_eq!(s.pick_many(2), Ok(PickSignal::Opened));
        assert_eq!(s.display().result().unwrap().students().len(), 2);
        assert_eq!(s.last_picked(), None);
    }

    #[test]
    fn pick_many_from_all_clamps_and_signals() {
        let roster: Roster = (1..=5).map(|i| StudentRecord::new(i, format!("S{i}"))).collect();
        let mut s = session_with(roster);
        assert_eq!(
            s.pick_many_from_all(8),
            Ok(PickSignal::OpenedClamped {
                requested: 8,
                available: 5
            })
        );
        assert_eq!(s.display().result().unwrap().students().len(), 5);
    }

    #[test]
    fn pick_one_from_all_sets_last_pick() {
        let mut s = session_with(abc());
        assert_eq!(s.pick_one_from_all(), Ok(PickSignal::Opened));
        assert!(s.last_picked().is_some());
    }

    #[test]
    fn new_pick_replaces_result_and_close_discards() {
        let mut s = session_with(abc());
        s.pick_many_from_all(3).unwrap();
        s.pick_one_from_all().unwrap();
        assert!(matches!(s.display().result(), Some(PickResult::Single(_))));
        s.close_display();
        assert!(!s.display().is_open());
    }

    #[test]
    fn view_filter() {
        let mut s = session_with(abc());
        s.toggle(StudentId(3)).unwrap();
        assert_eq!(s.visible_students().len(), 3);
        s.toggle_view();
        assert!(s.show_selected());
        let names: Vec<&str> = s.visible_students().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C"]);
    }

    #[test]
    fn persistence_failure_is_recorded_not_fatal() {
        let mut s = PickerSession::new(ReadOnlyStore, PickerConfig::default().with_seed(1));
        s.roster_loaded(abc());
        assert_eq!(s.toggle(StudentId(1)), Ok(true));
        assert!(s.selection().contains(StudentId(1)));
        assert!(s.persist_error().unwrap().contains("read-only"));

        assert_eq!(s.pick_one(), Ok(PickSignal::Opened));
        assert_eq!(s.last_picked(), Some(StudentId(1)));
    }

    #[test]
    fn all_dangling_multi_pick_opens_empty_result() {
        let mut s = session_with(abc());
        s.toggle(StudentId(77)).unwrap();
        s.toggle(StudentId(88)).unwrap();

        assert_eq!(s.pick_many(2), Ok(PickSignal::Opened));
        match s.display().result() {
            Some(PickResult::Multi(students)) => assert!(students.is_empty()),
            other => panic!("expected an empty multi result, got {other:?}"),
        }
        assert_eq!(s.last_picked(), None);
    }
}
