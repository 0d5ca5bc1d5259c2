use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use liveboard_core::cache::{ScheduleCache, ShiftSource};
use liveboard_core::models::ClockTime;
use liveboard_core::timeline::conflict::{Conflict, ConflictKind};
use liveboard_core::timeline::{LayoutEntity, RoomLayout};
use liveboard_core::{Shift, ShiftId};

use crate::error::CliError;

/// Day source backed by a JSON file holding an array of backend shift rows.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ShiftSource for JsonFileSource {
    fn fetch_shifts(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = liveboard_core::Result<Vec<Shift>>> + Send {
        let path = self.path.clone();
        async move {
            let raw = std::fs::read_to_string(&path)?;
            let shifts: Vec<Shift> = serde_json::from_str(&raw)?;
            tracing::debug!("Loaded {} shifts for {date} from {}", shifts.len(), path.display());
            Ok(shifts)
        }
    }
}

pub async fn load_day(date: NaiveDate, input: &Path) -> Result<Vec<Shift>, CliError> {
    let cache = ScheduleCache::new(JsonFileSource::new(input));
    Ok(cache.shifts_for(date).await?)
}

pub fn parse_schedule_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(raw.to_string()))
}

pub fn parse_start_time(raw: &str) -> Result<ClockTime, CliError> {
    let invalid = || CliError::InvalidTime(raw.to_string());
    let (hours, minutes) = raw.split_once(':').ok_or_else(invalid)?;
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(ClockTime::from_minutes(hours * 60 + minutes))
}

#[must_use]
pub fn find_block(layout: &RoomLayout, id: ShiftId) -> Option<&LayoutEntity> {
    layout
        .values()
        .flatten()
        .find(|entity| entity.block.shift_ids().contains(&id))
}

#[must_use]
pub fn format_layout_lines(layout: &RoomLayout) -> Vec<String> {
    let mut lines = Vec::new();
    for (room, entities) in layout {
        lines.push(format!("Room {room}"));
        for entity in entities {
            lines.push(format_entity_line(entity));
        }
    }
    lines
}

fn format_entity_line(entity: &LayoutEntity) -> String {
    let mut line = format!(
        "  {}  {}/{}  {}",
        entity.time_range(),
        entity.column_index + 1,
        entity.column_count,
        entity.block.display_name().unwrap_or("(unstaffed)"),
    );
    let extras = entity.block.member_count().saturating_sub(1);
    if extras > 0 {
        line.push_str(&format!(" +{extras}"));
    }
    if let Some(brand) = entity.block.brand_name() {
        line.push_str(&format!("  {brand}"));
    }
    if entity.block.has_conflict() {
        line.push_str("  [conflict]");
    }
    line
}

#[must_use]
pub fn format_conflict_lines(conflicts: &[Conflict]) -> Vec<String> {
    conflicts.iter().map(format_conflict_line).collect()
}

fn format_conflict_line(conflict: &Conflict) -> String {
    let kind = match conflict.kind {
        ConflictKind::DoubleBooking => "double booking",
        ConflictKind::RoleContention => "role contention",
    };
    let (first, second) = &conflict.people;
    let who = if first == second {
        first.clone()
    } else {
        format!("{first} / {second}")
    };
    let ids = [conflict.ids.0, conflict.ids.1]
        .into_iter()
        .flatten()
        .map(|id| format!("#{id}"))
        .collect::<Vec<String>>();
    let mut line = format!("{}  {kind}: {who}", conflict.overlap);
    if !ids.is_empty() {
        line.push_str(&format!("  ({})", ids.join(", ")));
    }
    line
}

#[must_use]
pub fn format_shift_lines(shifts: &[Shift]) -> Vec<String> {
    shifts.iter().map(format_shift_line).collect()
}

fn format_shift_line(shift: &Shift) -> String {
    let id = shift
        .id
        .map_or_else(|| "--".to_string(), |id| format!("#{id}"));
    let mut line = format!(
        "{id}  room {}  {}  {} ({})",
        shift.room,
        shift.time_range(),
        shift.display_name(),
        shift.role,
    );
    if let Some(brand) = &shift.brand_name {
        line.push_str(&format!("  {brand}"));
    }
    if shift.has_conflict {
        line.push_str("  [conflict]");
    }
    line
}
