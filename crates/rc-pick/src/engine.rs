//! The four pick modes.
//!
//! All functions are pure given their inputs and the RNG: they never touch
//! the selection, the last pick, or persistence. `PickerSession` applies
//! their results.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::{debug, warn};

use rc_core::{Roster, SelectionSet, StudentId, StudentRecord};

use crate::error::{EngineResult, PickError};
use crate::sample::{choose, sample};

/// Pick counts offered by frontends for the multi-pick modes.
pub const MULTI_PICK_COUNTS: RangeInclusive<usize> = 2..=10;

/// Result of a roster-wide multi-pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSample<'r> {
    /// Picked students in draw order.
    pub students: Vec<&'r StudentRecord>,
    /// `(requested, available)` when the request exceeded the roster size.
    pub clamped: Option<(usize, usize)>,
}

/// Pick one student from the selection, avoiding an immediate repeat.
///
/// With two or more selected ids, `excluding` is removed from the
/// candidates. With fewer, the pool is used as is, so a lone selected
/// student can be picked twice in a row. Returns `None` when there is no
/// candidate or the drawn id has no roster record.
pub fn pick_one<'r, R: Rng + ?Sized>(
    roster: &'r Roster,
    pool: &SelectionSet,
    excluding: Option<StudentId>,
    rng: &mut R,
) -> Option<&'r StudentRecord> {
    let candidates: Vec<StudentId> = if pool.len() >= 2 {
        pool.iter().filter(|id| Some(*id) != excluding).collect()
    } else {
        pool.iter().collect()
    };

    let id = choose(&candidates, rng)?;
    let student = roster.get(id);
    if student.is_none() {
        debug!(%id, "drawn id has no roster record");
    }
    student
}

/// Pick `count` distinct students from the selection.
///
/// Dangling ids that are drawn are dropped, so the result may hold fewer
/// than `count` records.
pub fn pick_many<'r, R: Rng + ?Sized>(
    roster: &'r Roster,
    pool: &SelectionSet,
    count: usize,
    rng: &mut R,
) -> EngineResult<Vec<&'r StudentRecord>> {
    if count == 0 {
        return Err(PickError::ZeroCount);
    }
    if pool.is_empty() {
        return Err(PickError::NoneSelected);
    }
    if pool.len() < count {
        return Err(PickError::NotEnoughSelected {
            selected: pool.len(),
            requested: count,
        });
    }

    let ids: Vec<StudentId> = pool.iter().collect();
    Ok(sample(&ids, count, rng)
        .into_iter()
        .filter_map(|id| roster.get(id))
        .collect())
}

/// Pick one student from the whole roster, with no repeat avoidance.
pub fn pick_one_from_all<'r, R: Rng + ?Sized>(
    roster: &'r Roster,
    rng: &mut R,
) -> EngineResult<&'r StudentRecord> {
    let ids: Vec<StudentId> = roster.ids().collect();
    choose(&ids, rng)
        .and_then(|id| roster.get(id))
        .ok_or(PickError::EmptyRoster)
}

/// Pick `count` distinct students from the whole roster.
///
/// A count larger than the number of distinct ids is clamped to it and
/// reported through [`RosterSample::clamped`].
pub fn pick_many_from_all<'r, R: Rng + ?Sized>(
    roster: &'r Roster,
    count: usize,
    rng: &mut R,
) -> EngineResult<RosterSample<'r>> {
    if count == 0 {
        return Err(PickError::ZeroCount);
    }
    if roster.is_empty() {
        return Err(PickError::EmptyRoster);
    }

    let available = roster.distinct_len();
    let clamped = (count > available).then_some((count, available));
    if clamped.is_some() {
        warn!(requested = count, available, "pick count exceeds roster size, clamping");
    }

    let ids: Vec<StudentId> = roster.ids().collect();
    let students = sample(&ids, count.min(available), rng)
        .into_iter()
        .filter_map(|id| roster.get(id))
        .collect();
    Ok(RosterSample { students, clamped })
}
