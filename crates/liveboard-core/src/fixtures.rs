//! Deterministic fixture days for tests and the inspector
//!
//! The generated day covers the board's interesting shapes: same-slot pairs
//! that merge, locale role spellings, a planted role contention, and a
//! planted cross-room double booking. Generation is pure arithmetic over
//! the config, so the same config always yields byte-identical days.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cache::ShiftSource;
use crate::error::Result;
use crate::models::{BrandColor, ClockTime, RoomId, Shift, ShiftId};

const STREAMER_NAMES: [&str; 6] = ["Ailing", "Botan", "Chiyo", "Daiyu", "Emiko", "Fei"];
const OPERATOR_NAMES: [&str; 6] = ["Guo", "Hina", "Iris", "Jun", "Kira", "Lan"];
const BRANDS: [(&str, &str); 3] = [
    ("Aurora", "#ff6b6b"),
    ("Borealis", "#4ecdc4"),
    ("Cinder", "#ffb347"),
];

/// Shape of a generated fixture day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureConfig {
    /// Rooms to fill, numbered from 1; zero or less yields an empty day
    pub rooms: i64,
    /// Plant the known conflict scenarios into rooms 1 and 2
    pub with_conflicts: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            rooms: 3,
            with_conflicts: true,
        }
    }
}

/// Build the deterministic fixture day for `config`.
///
/// Every room gets a branded morning pair sharing the 09:00-12:00 slot
/// (one streamer, one operator, so the slot merges without conflicting)
/// and an unbranded afternoon solo for the same streamer. With conflicts
/// enabled, `Mirai` contends for the streamer slot in room 1 and `Nox` is
/// double booked across rooms 1 and 2. Ids run from 1 in build order.
#[must_use]
pub fn fixture_day(config: &FixtureConfig) -> Vec<Shift> {
    if config.rooms <= 0 {
        return Vec::new();
    }

    let mut day = Vec::new();
    for room in 1..=config.rooms {
        let streamer = person_name(&STREAMER_NAMES, room);
        let operator = person_name(&OPERATOR_NAMES, room);
        let brand = BRANDS[usize::try_from(room - 1).unwrap_or(0) % BRANDS.len()];
        let (streamer_role, operator_role) = if room % 2 == 0 {
            ("streamer", "operator")
        } else {
            ("主播", "運營")
        };

        day.push(staffed(&streamer, streamer_role, room, "09:00", "12:00", Some(brand)));
        day.push(staffed(&operator, operator_role, room, "09:00", "12:00", Some(brand)));
        day.push(staffed(&streamer, streamer_role, room, "13:00", "18:00", None));
    }

    if config.with_conflicts {
        let second_room = if config.rooms > 1 { 2 } else { 1 };
        day.push(staffed("Mirai", "主播", 1, "10:00", "11:30", None));
        day.push(staffed("Nox", "運營", 1, "14:00", "16:00", None));
        day.push(staffed("Nox", "運營", second_room, "15:00", "17:00", None));
    }

    let mut next_id = 1;
    for shift in &mut day {
        shift.id = Some(ShiftId::new(next_id));
        next_id += 1;
    }
    day
}

fn person_name(pool: &[&str], room: i64) -> String {
    let index = usize::try_from(room - 1).unwrap_or(0);
    let base = pool[index % pool.len()];
    if index < pool.len() {
        base.to_string()
    } else {
        // Past the pool we suffix the room so nobody is accidentally
        // double booked across rooms.
        format!("{base} {room}")
    }
}

fn staffed(
    person: &str,
    role: &str,
    room: i64,
    start: &str,
    end: &str,
    brand: Option<(&str, &str)>,
) -> Shift {
    let mut shift = Shift::new(
        person,
        role,
        RoomId::new(room),
        ClockTime::parse(start),
        ClockTime::parse(end),
    );
    if let Some((name, color)) = brand {
        shift.brand_name = Some(name.to_string());
        shift.brand_color = BrandColor::parse(color);
    }
    shift
}

/// In-memory source serving the generated day for every date.
///
/// Stands in for the HTTP backend in tests and the inspector.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource {
    config: FixtureConfig,
}

impl FixtureSource {
    /// Source generating days of the given shape
    #[must_use]
    pub const fn new(config: FixtureConfig) -> Self {
        Self { config }
    }
}

impl ShiftSource for FixtureSource {
    fn fetch_shifts(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<Shift>>> + Send {
        let day = fixture_day(&self.config);
        async move {
            tracing::debug!("Serving {} fixture shifts for {date}", day.len());
            Ok(day)
        }
    }
}
