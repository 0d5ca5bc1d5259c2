use std::future::Future;
use std::path::Path;

use chrono::NaiveDate;
use liveboard_core::cache::{ScheduleCache, ShiftPersister};
use liveboard_core::models::{ClockTime, RoomId};
use liveboard_core::timeline::compute_room_layout;
use liveboard_core::timeline::relocation::{DropTarget, RelocationDecision, ShiftMove};
use liveboard_core::{Shift, ShiftId};
use serde::Serialize;

use crate::commands::common::{find_block, format_shift_lines, JsonFileSource};
use crate::error::CliError;

/// What the caller asked to move, and where to.
pub struct MoveRequest {
    pub id: ShiftId,
    pub room: RoomId,
    pub brand: Option<String>,
    pub start: ClockTime,
}

/// Accepts every move; the inspector has no live backend behind it.
struct DryRunPersister;

impl ShiftPersister for DryRunPersister {
    fn persist_move(
        &self,
        _mv: &ShiftMove,
    ) -> impl Future<Output = liveboard_core::Result<()>> + Send {
        async { Ok(()) }
    }
}

#[derive(Debug, Serialize)]
struct MoveReport {
    decision: RelocationDecision,
    day: Vec<Shift>,
}

pub async fn run_move(
    date: NaiveDate,
    input: &Path,
    request: MoveRequest,
    as_json: bool,
) -> Result<(), CliError> {
    let cache = ScheduleCache::new(JsonFileSource::new(input));
    let layout = compute_room_layout(cache.shifts_for(date).await?);
    let entity = find_block(&layout, request.id).ok_or(CliError::ShiftNotFound(request.id))?;

    let target = DropTarget {
        room: request.room,
        brand_name: request
            .brand
            .or_else(|| entity.block.brand_name().map(ToOwned::to_owned)),
        start_time: request.start,
    };

    let decision = cache
        .relocate(date, &entity.block, &target, &DryRunPersister)
        .await?;
    let day = cache.shifts_for(date).await?;

    if as_json {
        let report = MoveReport { decision, day };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &decision {
            RelocationDecision::Noop => println!("Nothing to change"),
            RelocationDecision::Move(mv) => {
                let moved = mv
                    .shift_ids
                    .iter()
                    .map(|id| format!("#{id}"))
                    .collect::<Vec<String>>()
                    .join(", ");
                println!(
                    "Moved {moved} to room {} at {}-{}",
                    mv.room, mv.start_time, mv.end_time
                );
                for line in format_shift_lines(&day) {
                    println!("{line}");
                }
            }
        }
    }

    Ok(())
}
