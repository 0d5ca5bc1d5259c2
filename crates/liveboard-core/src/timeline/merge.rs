//! Same-slot merging of a room's shifts

use std::collections::BTreeMap;

use crate::models::{ClockTime, MergedShift, RoleClass, Shift};

use super::{LayoutEntity, ScheduleBlock};

/// Collapse shifts sharing an exact `(start, end)` slot into merged blocks.
///
/// Takes one room's shifts and returns display blocks in ascending slot
/// order. A slot with a single shift passes through untouched; partial
/// overlaps never merge, they only share columns later.
#[must_use]
pub fn merge_same_slot(shifts: Vec<Shift>) -> Vec<LayoutEntity> {
    let mut slots: BTreeMap<(ClockTime, ClockTime), Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        slots
            .entry((shift.start_time, shift.end_time))
            .or_default()
            .push(shift);
    }

    slots
        .into_values()
        .map(|mut members| {
            let block = if members.len() == 1 {
                ScheduleBlock::Single(members.remove(0))
            } else {
                ScheduleBlock::Merged(merge_members(members))
            };
            LayoutEntity::new(block)
        })
        .collect()
}

/// Build one merged block from two or more same-slot shifts.
fn merge_members(mut members: Vec<Shift>) -> MergedShift {
    let has_conflict = members.iter().any(|member| member.has_conflict);
    if has_conflict {
        // The flag flows back so every constituent stays marked wherever
        // it surfaces again.
        for member in &mut members {
            member.has_conflict = true;
        }
    }

    let first = &members[0];
    let room = first.room;
    let start_time = first.start_time;
    let end_time = first.end_time;
    let brand_name = first.brand_name.clone();
    let brand_color = first.brand_color.clone();
    let source_shift_ids = members.iter().filter_map(|member| member.id).collect();
    let modification_status = members
        .iter()
        .map(|member| member.modification_status)
        .find(|status| !status.is_normal())
        .unwrap_or_default();
    let is_late_cancellation = members.iter().any(|member| member.is_late_cancellation);
    let late_hours = members.iter().map(|member| member.late_hours).sum();

    let (streamers, operators): (Vec<_>, Vec<_>) = members
        .into_iter()
        .partition(|member| member.role_class() == RoleClass::Streamer);

    MergedShift {
        room,
        start_time,
        end_time,
        brand_name,
        brand_color,
        streamers,
        operators,
        source_shift_ids,
        has_conflict,
        modification_status,
        is_late_cancellation,
        late_hours,
    }
}
