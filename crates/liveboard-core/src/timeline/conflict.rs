//! Pairwise conflict detection over a day's shifts

use serde::{Deserialize, Serialize};

use crate::models::{Shift, ShiftId, TimeRange};

/// Why two shifts were flagged against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// One person booked onto overlapping shifts
    DoubleBooking,
    /// Two people holding the same role class in one room at once
    RoleContention,
}

/// One flagged pair, reported for logs and the inspector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Rule that fired
    pub kind: ConflictKind,
    /// People involved; equal strings for a double booking
    pub people: (String, String),
    /// Backend ids of the two rows, where persisted
    pub ids: (Option<ShiftId>, Option<ShiftId>),
    /// Minutes the two shifts share
    pub overlap: TimeRange,
}

impl Conflict {
    fn pair(kind: ConflictKind, first: &Shift, second: &Shift) -> Self {
        Self {
            kind,
            people: (first.person_name.clone(), second.person_name.clone()),
            ids: (first.id, second.id),
            overlap: TimeRange::new(
                first.start_time.max(second.start_time),
                first.end_time.min(second.end_time),
            ),
        }
    }
}

/// The complete conflict rule for one pair.
///
/// A person overlapping themselves conflicts anywhere on the board. Two
/// different people conflict only inside one room and only when they hold
/// the same role class; a streamer paired with an operator is the normal
/// staffing pattern.
fn classify_pair(first: &Shift, second: &Shift) -> Option<ConflictKind> {
    if !first.overlaps(second) {
        return None;
    }
    if first.person_name == second.person_name {
        return Some(ConflictKind::DoubleBooking);
    }
    if first.room == second.room && first.role_class() == second.role_class() {
        return Some(ConflictKind::RoleContention);
    }
    None
}

/// Mark both sides of a flagged pair.
///
/// Peer sets hold ids, so marking the same pair again changes nothing and
/// repeated detection passes settle to the same state. A row without an id
/// still gets its flag; it just cannot be recorded as a peer.
fn mark_pair(shifts: &mut [Shift], first: usize, second: usize) {
    let (left, right) = shifts.split_at_mut(second);
    let first = &mut left[first];
    let second = &mut right[0];
    first.has_conflict = true;
    second.has_conflict = true;
    if let Some(id) = second.id {
        first.conflict_peers.insert(id);
    }
    if let Some(id) = first.id {
        second.conflict_peers.insert(id);
    }
}

/// The person rule alone: one person overlapping themselves, any room
fn person_rule(first: &Shift, second: &Shift) -> Option<ConflictKind> {
    (first.person_name == second.person_name && first.overlaps(second))
        .then_some(ConflictKind::DoubleBooking)
}

/// Run one pairwise rule over the slice, marking and reporting every hit
fn walk_pairs(
    shifts: &mut [Shift],
    rule: fn(&Shift, &Shift) -> Option<ConflictKind>,
) -> Vec<Conflict> {
    let mut found = Vec::new();
    for i in 0..shifts.len() {
        for j in (i + 1)..shifts.len() {
            if let Some(kind) = rule(&shifts[i], &shifts[j]) {
                mark_pair(shifts, i, j);
                found.push(Conflict::pair(kind, &shifts[i], &shifts[j]));
            }
        }
    }
    found
}

/// Flag double bookings and role contention inside one room's shifts
pub fn detect_room_conflicts(shifts: &mut [Shift]) -> Vec<Conflict> {
    walk_pairs(shifts, classify_pair)
}

/// Flag the same person scheduled onto overlapping shifts anywhere on the
/// board, regardless of room
pub fn detect_person_conflicts(shifts: &mut [Shift]) -> Vec<Conflict> {
    walk_pairs(shifts, person_rule)
}

/// Flag every conflicting pair across the whole day in one walk.
///
/// Equivalent in observable effect to the room pass followed by the person
/// pass, but each pair is reported exactly once, which is what the
/// inspector wants to print.
pub fn detect_conflicts(shifts: &mut [Shift]) -> Vec<Conflict> {
    walk_pairs(shifts, classify_pair)
}
