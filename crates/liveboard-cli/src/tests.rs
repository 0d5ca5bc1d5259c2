use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use liveboard_core::cache::ScheduleCache;
use liveboard_core::fixtures::{fixture_day, FixtureConfig};
use liveboard_core::models::{ClockTime, RoomId};
use liveboard_core::timeline::compute_room_layout;
use liveboard_core::timeline::conflict::detect_conflicts;
use liveboard_core::{Shift, ShiftId};

use crate::commands::common::{
    find_block, format_conflict_lines, format_layout_lines, format_shift_lines,
    parse_schedule_date, parse_start_time, JsonFileSource,
};
use crate::commands::relocate::{run_move, MoveRequest};
use crate::error::CliError;

#[test]
fn parse_schedule_date_reads_iso_dates_only() {
    assert_eq!(
        parse_schedule_date("2026-03-14").unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    );
    assert!(matches!(
        parse_schedule_date("14/03/2026"),
        Err(CliError::InvalidDate(_))
    ));
}

#[test]
fn parse_start_time_is_strict() {
    assert_eq!(
        parse_start_time("07:30").unwrap(),
        ClockTime::from_minutes(450)
    );
    assert!(matches!(
        parse_start_time("0730"),
        Err(CliError::InvalidTime(_))
    ));
    assert!(matches!(
        parse_start_time("10:99"),
        Err(CliError::InvalidTime(_))
    ));
    assert!(matches!(
        parse_start_time("25:00"),
        Err(CliError::InvalidTime(_))
    ));
}

#[test]
fn find_block_locates_merged_constituents() {
    let layout = compute_room_layout(fixture_day(&FixtureConfig::default()));

    let entity = find_block(&layout, ShiftId::new(2)).expect("fixture morning pair");
    assert_eq!(
        entity.block.shift_ids(),
        vec![ShiftId::new(1), ShiftId::new(2)]
    );
    assert!(find_block(&layout, ShiftId::new(99)).is_none());
}

#[test]
fn format_layout_lines_group_rooms_in_order() {
    let config = FixtureConfig {
        rooms: 2,
        with_conflicts: false,
    };
    let layout = compute_room_layout(fixture_day(&config));

    let lines = format_layout_lines(&layout);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Room 1");
    assert_eq!(lines[1], "  09:00-12:00  1/1  Ailing +1  Aurora");
    assert_eq!(lines[2], "  13:00-18:00  1/1  Ailing");
    assert_eq!(lines[3], "Room 2");
}

#[test]
fn format_conflict_lines_name_the_planted_scenarios() {
    let mut day = fixture_day(&FixtureConfig::default());
    let lines = format_conflict_lines(&detect_conflicts(&mut day));

    assert!(lines
        .iter()
        .any(|line| line.contains("role contention") && line.contains("Mirai")));
    assert!(lines
        .iter()
        .any(|line| line.contains("double booking") && line.contains("Nox")));
}

#[test]
fn format_shift_lines_include_ids_and_flags() {
    let config = FixtureConfig {
        rooms: 1,
        with_conflicts: true,
    };
    let mut day = fixture_day(&config);
    detect_conflicts(&mut day);

    let lines = format_shift_lines(&day);
    assert_eq!(
        lines[0],
        "#1  room 1  09:00-12:00  Ailing (主播)  Aurora  [conflict]"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn json_file_source_round_trips_a_day() {
    let day = fixture_day(&FixtureConfig::default());
    let path = write_day_file("round-trip", &day);

    let cache = ScheduleCache::new(JsonFileSource::new(&path));
    let loaded = cache.shifts_for(schedule_date()).await.unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, day);
}

#[tokio::test(flavor = "current_thread")]
async fn json_file_source_surfaces_missing_files() {
    let cache = ScheduleCache::new(JsonFileSource::new("/no/such/liveboard-day.json"));
    assert!(cache.shifts_for(schedule_date()).await.is_err());
}

#[tokio::test(flavor = "current_thread")]
async fn run_move_rejects_unknown_shift_ids() {
    let day = fixture_day(&FixtureConfig::default());
    let path = write_day_file("unknown-id", &day);

    let request = MoveRequest {
        id: ShiftId::new(99),
        room: RoomId::new(1),
        brand: None,
        start: ClockTime::parse("10:00"),
    };
    let result = run_move(schedule_date(), &path, request, true).await;
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(CliError::ShiftNotFound(_))));
}

#[tokio::test(flavor = "current_thread")]
async fn run_move_accepts_a_room_change() {
    let day = fixture_day(&FixtureConfig::default());
    let path = write_day_file("room-change", &day);

    let request = MoveRequest {
        id: ShiftId::new(3),
        room: RoomId::new(3),
        brand: None,
        start: ClockTime::parse("13:00"),
    };
    let result = run_move(schedule_date(), &path, request, true).await;
    let _ = std::fs::remove_file(&path);

    assert!(result.is_ok());
}

fn schedule_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn write_day_file(prefix: &str, day: &[Shift]) -> PathBuf {
    static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let sequence = NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "liveboard-cli-{prefix}-{timestamp}-{sequence}.json"
    ));
    std::fs::write(&path, serde_json::to_string_pretty(day).unwrap()).unwrap();
    path
}
