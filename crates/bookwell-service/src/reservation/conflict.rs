//! Interval conflict detection for a single window.
//!
//! Intervals are half-open: `[s1, e1)` and `[s2, e2)` conflict iff
//! `s1 < e2 && s2 < e1`. Touching intervals do not conflict.

use bookwell_entity::interval::Interval;

/// Return the first existing interval that overlaps `candidate`.
///
/// `existing` must be sorted by start ascending. The scan stops at the
/// first interval starting at or after `candidate.end()`, since no later
/// interval can overlap.
pub fn first_conflict(candidate: &Interval, existing: &[Interval]) -> Option<Interval> {
    existing
        .iter()
        .take_while(|other| other.start() < candidate.end())
        .find(|other| other.overlaps(candidate))
        .copied()
}

/// Whether `candidate` overlaps none of `existing` (sorted by start ascending).
pub fn admits(candidate: &Interval, existing: &[Interval]) -> bool {
    first_conflict(candidate, existing).is_none()
}
