//! Timeline pipeline: conflict detection, same-slot merging, column layout
//!
//! One call to [`compute_room_layout`] turns a day's raw shift rows into a
//! per-room list of positioned blocks. Every pass derives from the raw rows
//! alone, so repeating the call on the same day yields the same board.

pub mod columns;
pub mod conflict;
pub mod merge;
pub mod relocation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{MergedShift, RoomId, Shift, ShiftId, TimeRange};

/// A block rendered on the board: one shift or one merged slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScheduleBlock {
    /// An untouched single shift
    Single(Shift),
    /// Several same-slot shifts collapsed into one block
    Merged(MergedShift),
}

impl ScheduleBlock {
    /// Room the block sits in
    #[must_use]
    pub fn room(&self) -> RoomId {
        match self {
            Self::Single(shift) => shift.room,
            Self::Merged(merged) => merged.room,
        }
    }

    /// Half-open time range the block covers
    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        match self {
            Self::Single(shift) => shift.time_range(),
            Self::Merged(merged) => merged.time_range(),
        }
    }

    /// Brand shown on the block, when any
    #[must_use]
    pub fn brand_name(&self) -> Option<&str> {
        match self {
            Self::Single(shift) => shift.brand_name.as_deref(),
            Self::Merged(merged) => merged.brand_name.as_deref(),
        }
    }

    /// True when the block carries a conflict
    #[must_use]
    pub fn has_conflict(&self) -> bool {
        match self {
            Self::Single(shift) => shift.has_conflict,
            Self::Merged(merged) => merged.has_conflict,
        }
    }

    /// Every persisted row id behind the block.
    ///
    /// One id for a single shift (empty when unsaved), all constituent ids
    /// for a merged slot.
    #[must_use]
    pub fn shift_ids(&self) -> Vec<ShiftId> {
        match self {
            Self::Single(shift) => shift.id.into_iter().collect(),
            Self::Merged(merged) => merged.source_shift_ids.clone(),
        }
    }

    /// Name shown on the block, when anyone is on it
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Single(shift) => Some(shift.display_name()),
            Self::Merged(merged) => merged.display_name(),
        }
    }

    /// Number of shifts behind the block
    #[must_use]
    pub fn member_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Merged(merged) => merged.member_count(),
        }
    }
}

/// A block with its computed column position inside a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntity {
    /// The block content
    #[serde(flatten)]
    pub block: ScheduleBlock,
    /// Column the block occupies within its room
    pub column_index: usize,
    /// Total columns open in the room
    pub column_count: usize,
}

impl LayoutEntity {
    /// Wrap a block before column assignment
    #[must_use]
    pub const fn new(block: ScheduleBlock) -> Self {
        Self {
            block,
            column_index: 0,
            column_count: 1,
        }
    }

    /// Half-open time range of the block
    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        self.block.time_range()
    }
}

/// Final per-room board for one day, in ascending room order
pub type RoomLayout = BTreeMap<RoomId, Vec<LayoutEntity>>;

/// Run the full board pipeline over one day's shifts.
///
/// Steps: deterministic sort, per-room conflict pass, day-wide person pass,
/// same-slot merge, column assignment. Derived state left over from an
/// earlier pass is cleared first, so the result depends on the raw rows
/// alone and the call is idempotent. No shift is ever dropped: the blocks
/// in the returned layout account for every input row.
#[must_use]
pub fn compute_room_layout(mut shifts: Vec<Shift>) -> RoomLayout {
    for shift in &mut shifts {
        shift.clear_conflicts();
    }
    shifts.sort_by_key(|shift| (shift.room, shift.start_time, shift.end_time, shift.id));

    let mut flagged = 0;
    let mut start = 0;
    while start < shifts.len() {
        let room = shifts[start].room;
        let mut end = start;
        while end < shifts.len() && shifts[end].room == room {
            end += 1;
        }
        flagged += conflict::detect_room_conflicts(&mut shifts[start..end]).len();
        start = end;
    }
    flagged += conflict::detect_person_conflicts(&mut shifts).len();
    if flagged > 0 {
        tracing::debug!("Flagged {} conflicting pairs across the day", flagged);
    }

    let mut rooms: BTreeMap<RoomId, Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        rooms.entry(shift.room).or_default().push(shift);
    }

    let mut layout = RoomLayout::new();
    for (room, members) in rooms {
        let mut entities = merge::merge_same_slot(members);
        columns::assign_columns(&mut entities);
        tracing::debug!(
            "Room {}: {} blocks in {} columns",
            room,
            entities.len(),
            entities.first().map_or(1, |entity| entity.column_count)
        );
        layout.insert(room, entities);
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClockTime;
    use pretty_assertions::assert_eq;

    fn shift(id: i64, person: &str, role: &str, room: i64, start: &str, end: &str) -> Shift {
        let mut shift = Shift::new(
            person,
            role,
            RoomId::new(room),
            ClockTime::parse(start),
            ClockTime::parse(end),
        );
        shift.id = Some(ShiftId::new(id));
        shift
    }

    fn sample_day() -> Vec<Shift> {
        vec![
            // Room 1: a streamer/operator pair sharing a slot, plus an
            // afternoon solo that overlaps nobody.
            shift(1, "Alice", "主播", 1, "09:00", "12:00"),
            shift(2, "Bob", "運營", 1, "09:00", "12:00"),
            shift(3, "Cara", "主播", 1, "13:00", "18:00"),
            // Room 2: two streamers halfway on top of each other.
            shift(4, "Dina", "streamer", 2, "10:00", "14:00"),
            shift(5, "Elle", "anchor", 2, "12:00", "16:00"),
            // Fred works room 2, then is double booked into room 3.
            shift(6, "Fred", "運營", 2, "10:00", "13:00"),
            shift(7, "Fred", "運營", 3, "12:00", "15:00"),
        ]
    }

    fn flat_members(layout: &RoomLayout) -> usize {
        layout
            .values()
            .flatten()
            .map(|entity| entity.block.member_count())
            .sum()
    }

    #[test]
    fn pipeline_accounts_for_every_shift() {
        let day = sample_day();
        let layout = compute_room_layout(day.clone());
        assert_eq!(flat_members(&layout), day.len());
        assert_eq!(
            layout.keys().copied().collect::<Vec<_>>(),
            vec![RoomId::new(1), RoomId::new(2), RoomId::new(3)]
        );
    }

    #[test]
    fn pipeline_merges_and_flags() {
        let layout = compute_room_layout(sample_day());

        let room1 = &layout[&RoomId::new(1)];
        assert_eq!(room1.len(), 2);
        let ScheduleBlock::Merged(pair) = &room1[0].block else {
            panic!("expected the 09:00 slot to merge");
        };
        assert_eq!(pair.streamers.len(), 1);
        assert_eq!(pair.operators.len(), 1);
        assert!(!pair.has_conflict);

        // Dina and Elle contend for the streamer role in room 2.
        let room2 = &layout[&RoomId::new(2)];
        let dina = room2
            .iter()
            .find_map(|entity| match &entity.block {
                ScheduleBlock::Single(shift) if shift.person_name == "Dina" => Some(shift),
                _ => None,
            })
            .unwrap();
        assert!(dina.has_conflict);
        assert!(dina.conflict_peers.contains(&ShiftId::new(5)));

        // Fred's cross-room double booking is flagged in both rooms.
        let fred_room3 = &layout[&RoomId::new(3)][0];
        assert!(fred_room3.block.has_conflict());
    }

    #[test]
    fn pipeline_is_idempotent_over_annotated_input() {
        let first = compute_room_layout(sample_day());
        // Feed the already-annotated rows back through the pipeline.
        let annotated: Vec<Shift> = first
            .values()
            .flatten()
            .flat_map(|entity| match &entity.block {
                ScheduleBlock::Single(shift) => vec![shift.clone()],
                ScheduleBlock::Merged(merged) => merged.members().cloned().collect(),
            })
            .collect();
        let second = compute_room_layout(annotated);
        assert_eq!(first, second);
    }

    #[test]
    fn pipeline_ignores_input_order() {
        let mut reversed = sample_day();
        reversed.reverse();
        assert_eq!(compute_room_layout(sample_day()), compute_room_layout(reversed));
    }

    #[test]
    fn empty_day_yields_empty_layout() {
        assert!(compute_room_layout(Vec::new()).is_empty());
    }

    #[test]
    fn block_ids_for_single_and_merged() {
        let layout = compute_room_layout(sample_day());
        let room1 = &layout[&RoomId::new(1)];
        assert_eq!(
            room1[0].block.shift_ids(),
            vec![ShiftId::new(1), ShiftId::new(2)]
        );
        assert_eq!(room1[1].block.shift_ids(), vec![ShiftId::new(3)]);
    }
}
