//! Shift model and role classification

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::brand::BrandColor;
use super::clock::{ClockTime, TimeRange};
use super::day::RoomId;

/// A unique identifier for a persisted shift (the backend row id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(i64);

impl ShiftId {
    /// Wrap a backend row id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw row id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShiftId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for ShiftId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Canonical role classes used for every role comparison.
///
/// The backend stores free-form role labels in several locales; the board
/// only cares which of its two classes a label falls into. Labels matching
/// none of the known streamer spellings land in the operator class, the
/// board's default bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleClass {
    /// On-camera streamer
    Streamer,
    /// Off-camera operations staff, and every unrecognised label
    Operator,
}

impl RoleClass {
    /// Classify a raw role label.
    ///
    /// # Examples
    ///
    /// ```
    /// use liveboard_core::models::RoleClass;
    ///
    /// assert_eq!(RoleClass::classify("主播"), RoleClass::Streamer);
    /// assert_eq!(RoleClass::classify("Anchor"), RoleClass::Streamer);
    /// assert_eq!(RoleClass::classify("運營"), RoleClass::Operator);
    /// assert_eq!(RoleClass::classify("stage manager"), RoleClass::Operator);
    /// ```
    #[must_use]
    pub fn classify(label: &str) -> Self {
        const STREAMER_LABELS: [&str; 3] = ["主播", "streamer", "anchor"];
        let label = label.trim();
        if STREAMER_LABELS
            .iter()
            .any(|known| label.eq_ignore_ascii_case(known))
        {
            Self::Streamer
        } else {
            Self::Operator
        }
    }
}

/// Manual modification state carried on a shift row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationStatus {
    /// Unmodified shift
    #[default]
    Normal,
    /// Late arrival recorded
    Late,
    /// Cancelled shift
    Cancelled,
    /// Any other manual adjustment
    Other,
}

impl ModificationStatus {
    /// True for the unmodified state
    #[must_use]
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// One scheduled shift on the day board.
///
/// Rows arrive from the backend as display data and are kept even when
/// malformed: bad times parse to midnight, bad rooms to room 0, bad colours
/// to no colour. The conflict fields are derived and recomputed on every
/// layout pass; they are never part of the authoritative row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Backend row id; absent for rows not yet persisted
    #[serde(default)]
    pub id: Option<ShiftId>,
    /// Person display name; equality is exact string match
    pub person_name: String,
    /// Optional short name shown on narrow blocks
    #[serde(default)]
    pub nick_name: Option<String>,
    /// Raw role label as stored by the backend (see [`RoleClass`])
    pub role: String,
    /// Room key; room 0 collects unassigned shifts
    #[serde(default)]
    pub room: RoomId,
    /// Brand shown on the block, when any
    #[serde(default)]
    pub brand_name: Option<String>,
    /// Validated brand colour, when any
    #[serde(default, deserialize_with = "super::brand::deserialize_lenient")]
    pub brand_color: Option<BrandColor>,
    /// Shift start
    pub start_time: ClockTime,
    /// Shift end
    pub end_time: ClockTime,
    /// Late-cancellation marker
    #[serde(default)]
    pub is_late_cancellation: bool,
    /// Hours counted as late against the person
    #[serde(default)]
    pub late_hours: f64,
    /// Manual modification state
    #[serde(default)]
    pub modification_status: ModificationStatus,
    /// Conflict flag; derived on each pass
    #[serde(default)]
    pub has_conflict: bool,
    /// Ids of other shifts this one conflicts with; derived on each pass
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub conflict_peers: BTreeSet<ShiftId>,
}

impl Shift {
    /// Create a minimal shift; everything else starts at its default
    #[must_use]
    pub fn new(
        person_name: impl Into<String>,
        role: impl Into<String>,
        room: RoomId,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        Self {
            id: None,
            person_name: person_name.into(),
            nick_name: None,
            role: role.into(),
            room,
            brand_name: None,
            brand_color: None,
            start_time,
            end_time,
            is_late_cancellation: false,
            late_hours: 0.0,
            modification_status: ModificationStatus::default(),
            has_conflict: false,
            conflict_peers: BTreeSet::new(),
        }
    }

    /// Canonical role class for this shift's raw label
    #[must_use]
    pub fn role_class(&self) -> RoleClass {
        RoleClass::classify(&self.role)
    }

    /// Name shown on the block: nick name when set, else the full name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nick_name
            .as_deref()
            .filter(|nick| !nick.trim().is_empty())
            .unwrap_or(&self.person_name)
    }

    /// Half-open time range of this shift
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// True when the two shifts share at least one minute
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.time_range().overlaps(other.time_range())
    }

    /// Scheduled hours, derived from the time fields
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.time_range().duration_hours()
    }

    /// Forget derived conflict state ahead of a fresh detection pass
    pub fn clear_conflicts(&mut self) {
        self.has_conflict = false;
        self.conflict_peers.clear();
    }
}
