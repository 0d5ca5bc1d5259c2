//! Day grouping and room keys

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::shift::{Shift, ShiftId};

/// Room key on the board.
///
/// Rooms are small positive integers; room 0 collects shifts that have no
/// assigned room yet. Backend rows carry the key as an integer, but
/// imported data sometimes stringifies it, so both forms deserialize and
/// anything else degrades to room 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// The catch-all room for shifts without an assignment
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a room number
    #[must_use]
    pub const fn new(room: i64) -> Self {
        Self(room)
    }

    /// The raw room number
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// True for the catch-all room
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer) {
            Ok(Raw::Number(room)) => Self(room),
            Ok(Raw::Text(text)) => text.trim().parse::<i64>().map(Self).unwrap_or_default(),
            Err(_) => Self::UNASSIGNED,
        })
    }
}

/// All shifts fetched for one schedule date.
///
/// Holds the raw rows exactly as fetched; conflict flags and layout output
/// are derived per pass and never written back here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    /// Schedule date the shifts belong to
    pub date: NaiveDate,
    /// Raw rows for the date
    pub shifts: Vec<Shift>,
}

impl DayGroup {
    /// Group the given rows under a date
    #[must_use]
    pub const fn new(date: NaiveDate, shifts: Vec<Shift>) -> Self {
        Self { date, shifts }
    }

    /// Number of rows in the day
    #[must_use]
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// True when the day has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Look up a row by backend id
    #[must_use]
    pub fn shift(&self, id: ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|shift| shift.id == Some(id))
    }

    /// Total scheduled hours per person for the day
    #[must_use]
    pub fn person_hours(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for shift in &self.shifts {
            *totals.entry(shift.person_name.clone()).or_insert(0.0) += shift.duration_hours();
        }
        totals
    }

    /// Total scheduled hours per brand for the day; unbranded rows are skipped
    #[must_use]
    pub fn brand_hours(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for shift in &self.shifts {
            if let Some(brand) = &shift.brand_name {
                *totals.entry(brand.clone()).or_insert(0.0) += shift.duration_hours();
            }
        }
        totals
    }
}
