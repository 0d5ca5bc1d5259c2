//! Merged schedule block

use serde::{Deserialize, Serialize};

use super::brand::BrandColor;
use super::clock::{ClockTime, TimeRange};
use super::day::RoomId;
use super::shift::{ModificationStatus, Shift, ShiftId};

/// Several shifts sharing one exact time slot in a room, collapsed into a
/// single display block.
///
/// A merged block has no row id of its own; `source_shift_ids` names every
/// persisted constituent, and a relocation updates all of them identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedShift {
    /// Room all constituents share
    pub room: RoomId,
    /// Slot start shared by every constituent
    pub start_time: ClockTime,
    /// Slot end shared by every constituent
    pub end_time: ClockTime,
    /// Brand of the first constituent, when any
    pub brand_name: Option<String>,
    /// Brand colour of the first constituent, when any
    pub brand_color: Option<BrandColor>,
    /// Constituents classified as streamers, in input order
    pub streamers: Vec<Shift>,
    /// Every other constituent, in input order
    pub operators: Vec<Shift>,
    /// Ids of every persisted constituent, in input order
    pub source_shift_ids: Vec<ShiftId>,
    /// True when any constituent holds a conflict
    pub has_conflict: bool,
    /// First non-normal constituent status, else normal
    pub modification_status: ModificationStatus,
    /// True when any constituent is a late cancellation
    pub is_late_cancellation: bool,
    /// Late hours summed over constituents
    pub late_hours: f64,
}

impl MergedShift {
    /// Name shown on the block: first streamer, else first operator
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.streamers
            .first()
            .or_else(|| self.operators.first())
            .map(Shift::display_name)
    }

    /// Number of collapsed shifts
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.streamers.len() + self.operators.len()
    }

    /// Every constituent, streamers first
    pub fn members(&self) -> impl Iterator<Item = &Shift> {
        self.streamers.iter().chain(self.operators.iter())
    }

    /// Half-open range of the shared slot
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Hours covered by the shared slot
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.time_range().duration_hours()
    }
}
