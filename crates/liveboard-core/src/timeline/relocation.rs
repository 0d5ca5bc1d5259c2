//! Drag relocation: deciding what a drop means

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{ClockTime, RoomId, ShiftId};

use super::ScheduleBlock;

/// A unique identifier for one drag interaction, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DragSessionId(Uuid);

impl DragSessionId {
    /// Create a new unique session ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for DragSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DragSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a block was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    /// Destination room
    pub room: RoomId,
    /// Destination brand; plain moves keep the origin brand
    pub brand_name: Option<String>,
    /// Destination start; the end follows from the preserved duration
    pub start_time: ClockTime,
}

/// The update persisted and reconciled for a real move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftMove {
    /// Every backend row to update: one id for a single shift, every
    /// constituent id for a merged block, all updated identically
    pub shift_ids: Vec<ShiftId>,
    /// New room
    pub room: RoomId,
    /// New brand
    pub brand_name: Option<String>,
    /// New start
    pub start_time: ClockTime,
    /// New end, exactly the original duration after the new start
    pub end_time: ClockTime,
}

/// Outcome of validating a drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum RelocationDecision {
    /// Nothing changed; skip persistence entirely
    Noop,
    /// A real move with the update to persist
    Move(ShiftMove),
}

/// Decide what dropping `block` onto `target` means.
///
/// Unchanged room, brand and start collapse to [`RelocationDecision::Noop`].
/// A real move keeps the block's duration to the minute; a destination that
/// would push the end past 24:00 is refused rather than silently shortened,
/// and a block with no persisted ids has nothing to move.
pub fn validate_relocation(
    block: &ScheduleBlock,
    target: &DropTarget,
) -> Result<RelocationDecision> {
    let origin = block.time_range();
    if block.room() == target.room
        && block.brand_name() == target.brand_name.as_deref()
        && origin.start == target.start_time
    {
        return Ok(RelocationDecision::Noop);
    }

    let shift_ids = block.shift_ids();
    if shift_ids.is_empty() {
        return Err(Error::InvalidInput(
            "block has no persisted shifts to move".to_string(),
        ));
    }

    let duration = origin.duration_minutes();
    let end_time = target
        .start_time
        .checked_add_minutes(duration)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "moving a {duration}-minute block to {} would cross midnight",
                target.start_time
            ))
        })?;

    Ok(RelocationDecision::Move(ShiftMove {
        shift_ids,
        room: target.room,
        brand_name: target.brand_name.clone(),
        start_time: target.start_time,
        end_time,
    }))
}

/// Live state of one drag interaction.
///
/// Snapshots the block at pick-up so the decision at drop time cannot be
/// skewed by a re-render in between; the session id ties log lines of one
/// gesture together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Session identifier carried through logs
    pub id: DragSessionId,
    /// Snapshot of the dragged block at pick-up time
    pub block: ScheduleBlock,
    /// Pick-up timestamp (Unix ms)
    pub started_at: i64,
}

impl DragSession {
    /// Start a drag over the given block
    #[must_use]
    pub fn begin(block: ScheduleBlock) -> Self {
        let session = Self {
            id: DragSessionId::new(),
            block,
            started_at: chrono::Utc::now().timestamp_millis(),
        };
        tracing::debug!("Drag {} started", session.id);
        session
    }

    /// Decide what dropping the dragged block onto `target` means
    pub fn drop_at(&self, target: &DropTarget) -> Result<RelocationDecision> {
        let decision = validate_relocation(&self.block, target)?;
        match &decision {
            RelocationDecision::Noop => {
                tracing::debug!("Drag {} dropped in place", self.id);
            }
            RelocationDecision::Move(mv) => {
                tracing::debug!(
                    "Drag {} moves {} shifts to room {} at {}",
                    self.id,
                    mv.shift_ids.len(),
                    mv.room,
                    mv.start_time
                );
            }
        }
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MergedShift, ModificationStatus, Shift};
    use pretty_assertions::assert_eq;

    fn single_block(id: i64, room: i64, start: &str, end: &str) -> ScheduleBlock {
        let mut shift = Shift::new(
            "Alice",
            "主播",
            RoomId::new(room),
            ClockTime::parse(start),
            ClockTime::parse(end),
        );
        shift.id = Some(ShiftId::new(id));
        shift.brand_name = Some("Aurora".to_string());
        ScheduleBlock::Single(shift)
    }

    fn merged_block(ids: &[i64], room: i64, start: &str, end: &str) -> ScheduleBlock {
        ScheduleBlock::Merged(MergedShift {
            room: RoomId::new(room),
            start_time: ClockTime::parse(start),
            end_time: ClockTime::parse(end),
            brand_name: None,
            brand_color: None,
            streamers: Vec::new(),
            operators: Vec::new(),
            source_shift_ids: ids.iter().copied().map(ShiftId::new).collect(),
            has_conflict: false,
            modification_status: ModificationStatus::Normal,
            is_late_cancellation: false,
            late_hours: 0.0,
        })
    }

    fn target(room: i64, brand: Option<&str>, start: &str) -> DropTarget {
        DropTarget {
            room: RoomId::new(room),
            brand_name: brand.map(str::to_string),
            start_time: ClockTime::parse(start),
        }
    }

    #[test]
    fn unchanged_drop_is_noop() {
        let block = single_block(1, 2, "09:00", "11:00");
        let decision =
            validate_relocation(&block, &target(2, Some("Aurora"), "09:00")).unwrap();
        assert_eq!(decision, RelocationDecision::Noop);
    }

    #[test]
    fn moved_start_preserves_duration() {
        let block = single_block(1, 2, "09:00", "11:00");
        let RelocationDecision::Move(mv) =
            validate_relocation(&block, &target(2, Some("Aurora"), "14:00")).unwrap()
        else {
            panic!("expected a move");
        };
        assert_eq!(mv.start_time.to_string(), "14:00");
        assert_eq!(mv.end_time.to_string(), "16:00");
        assert_eq!(mv.shift_ids, vec![ShiftId::new(1)]);
    }

    #[test]
    fn changed_room_alone_is_a_move() {
        let block = single_block(1, 2, "09:00", "11:00");
        let RelocationDecision::Move(mv) =
            validate_relocation(&block, &target(5, Some("Aurora"), "09:00")).unwrap()
        else {
            panic!("expected a move");
        };
        assert_eq!(mv.room, RoomId::new(5));
        assert_eq!(mv.start_time.to_string(), "09:00");
        assert_eq!(mv.end_time.to_string(), "11:00");
    }

    #[test]
    fn changed_brand_alone_is_a_move() {
        let block = single_block(1, 2, "09:00", "11:00");
        let decision =
            validate_relocation(&block, &target(2, Some("Borealis"), "09:00")).unwrap();
        assert!(matches!(decision, RelocationDecision::Move(_)));
    }

    #[test]
    fn merged_move_lists_every_constituent() {
        let block = merged_block(&[4, 5, 6], 1, "09:00", "12:00");
        let RelocationDecision::Move(mv) =
            validate_relocation(&block, &target(3, None, "13:00")).unwrap()
        else {
            panic!("expected a move");
        };
        assert_eq!(
            mv.shift_ids,
            vec![ShiftId::new(4), ShiftId::new(5), ShiftId::new(6)]
        );
        assert_eq!(mv.end_time.to_string(), "16:00");
    }

    #[test]
    fn cross_midnight_move_is_refused() {
        let block = single_block(1, 2, "09:00", "11:00");
        let result = validate_relocation(&block, &target(2, Some("Aurora"), "23:30"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn move_ending_exactly_at_midnight_is_allowed() {
        let block = single_block(1, 2, "09:00", "11:00");
        let RelocationDecision::Move(mv) =
            validate_relocation(&block, &target(2, Some("Aurora"), "22:00")).unwrap()
        else {
            panic!("expected a move");
        };
        assert_eq!(mv.end_time, ClockTime::END_OF_DAY);
    }

    #[test]
    fn unsaved_block_cannot_move() {
        let block = ScheduleBlock::Single(Shift::new(
            "Alice",
            "主播",
            RoomId::new(1),
            ClockTime::parse("09:00"),
            ClockTime::parse("11:00"),
        ));
        let result = validate_relocation(&block, &target(2, None, "10:00"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn empty_merged_id_list_cannot_move() {
        let block = merged_block(&[], 1, "09:00", "12:00");
        let result = validate_relocation(&block, &target(2, None, "10:00"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn session_snapshot_drives_the_decision() {
        let session = DragSession::begin(single_block(1, 2, "09:00", "11:00"));
        let decision = session.drop_at(&target(2, Some("Aurora"), "09:00")).unwrap();
        assert_eq!(decision, RelocationDecision::Noop);
        let decision = session.drop_at(&target(4, Some("Aurora"), "09:30")).unwrap();
        assert!(matches!(decision, RelocationDecision::Move(_)));
    }
}
