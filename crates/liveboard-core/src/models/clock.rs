//! Clock times and half-open time ranges within one schedule day

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a full schedule day (24:00)
pub const MINUTES_PER_DAY: u16 = 1440;

/// A time of day stored as minutes since midnight.
///
/// Parsing follows the board's lenient display rules: a missing or garbled
/// part of an `HH:MM` string counts as zero instead of failing, and the
/// total is clamped to 24:00 so a value never leaves the day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, the fallback for unparsable input
    pub const MIDNIGHT: Self = Self(0);

    /// End of the schedule day (24:00)
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Create a time from a minute offset, clamped to 24:00
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Self {
        if minutes > MINUTES_PER_DAY {
            Self(MINUTES_PER_DAY)
        } else {
            Self(minutes)
        }
    }

    /// Parse an `HH:MM` string.
    ///
    /// Never fails: a part that is missing or not a number counts as zero,
    /// matching how the board renders bad rows instead of dropping them.
    ///
    /// # Examples
    ///
    /// ```
    /// use liveboard_core::models::ClockTime;
    ///
    /// assert_eq!(ClockTime::parse("07:30").minutes(), 450);
    /// assert_eq!(ClockTime::parse("7:30").minutes(), 450);
    /// assert_eq!(ClockTime::parse("garbage").minutes(), 0);
    /// assert_eq!(ClockTime::parse("12:xx").minutes(), 720);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut parts = value.splitn(2, ':');
        let hour = number_or_zero(parts.next());
        let minute = number_or_zero(parts.next());
        let total = hour * 60 + minute;
        Self::from_minutes(u16::try_from(total).unwrap_or(MINUTES_PER_DAY))
    }

    /// Minutes since midnight
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component (0-24)
    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0-59)
    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Add a duration, or `None` when the result would pass 24:00
    #[must_use]
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let total = self.0.saturating_add(minutes);
        (total <= MINUTES_PER_DAY).then_some(Self(total))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<String> for ClockTime {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

fn number_or_zero(part: Option<&str>) -> u32 {
    part.and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// A half-open range `[start, end)` within one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// First minute covered
    pub start: ClockTime,
    /// First minute no longer covered
    pub end: ClockTime,
}

impl TimeRange {
    /// Create a range from its endpoints
    #[must_use]
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// True when the two ranges share at least one minute.
    ///
    /// Half-open semantics: a range ending 12:00 does not touch one
    /// starting 12:00, and an empty range overlaps nothing.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length in minutes; zero when the endpoints are inverted
    #[must_use]
    pub fn duration_minutes(self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Length in hours
    #[must_use]
    pub fn duration_hours(self) -> f64 {
        f64::from(self.duration_minutes()) / 60.0
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::new(ClockTime::parse(start), ClockTime::parse(end))
    }

    #[test]
    fn parse_well_formed() {
        assert_eq!(ClockTime::parse("00:00").minutes(), 0);
        assert_eq!(ClockTime::parse("07:30").minutes(), 450);
        assert_eq!(ClockTime::parse("23:59").minutes(), 1439);
        assert_eq!(ClockTime::parse("24:00").minutes(), 1440);
    }

    #[test]
    fn parse_degrades_instead_of_failing() {
        assert_eq!(ClockTime::parse("").minutes(), 0);
        assert_eq!(ClockTime::parse("garbage").minutes(), 0);
        assert_eq!(ClockTime::parse(":30").minutes(), 30);
        assert_eq!(ClockTime::parse("12:").minutes(), 720);
        assert_eq!(ClockTime::parse("12:xx").minutes(), 720);
        assert_eq!(ClockTime::parse("-1:00").minutes(), 0);
    }

    #[test]
    fn parse_clamps_to_end_of_day() {
        assert_eq!(ClockTime::parse("25:00"), ClockTime::END_OF_DAY);
        assert_eq!(ClockTime::parse("9999:9999"), ClockTime::END_OF_DAY);
    }

    #[test]
    fn display_zero_pads() {
        assert_eq!(ClockTime::parse("7:05").to_string(), "07:05");
        assert_eq!(ClockTime::parse("00:00").to_string(), "00:00");
        assert_eq!(ClockTime::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn display_round_trips() {
        for raw in ["00:00", "07:30", "18:45", "23:59"] {
            assert_eq!(ClockTime::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn checked_add_stops_at_end_of_day() {
        let start = ClockTime::parse("22:00");
        assert_eq!(start.checked_add_minutes(120), Some(ClockTime::END_OF_DAY));
        assert_eq!(start.checked_add_minutes(121), None);
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(!range("10:00", "12:00").overlaps(range("12:00", "14:00")));
        assert!(!range("12:00", "14:00").overlaps(range("10:00", "12:00")));
        assert!(range("10:00", "12:01").overlaps(range("12:00", "14:00")));
    }

    #[test]
    fn overlap_contained_and_partial() {
        assert!(range("09:00", "18:00").overlaps(range("10:00", "11:00")));
        assert!(range("10:00", "11:00").overlaps(range("09:00", "18:00")));
        assert!(range("09:00", "11:00").overlaps(range("10:00", "12:00")));
    }

    #[test]
    fn empty_range_overlaps_nothing() {
        let empty = range("10:00", "10:00");
        assert!(!empty.overlaps(range("09:00", "11:00")));
        assert!(!range("09:00", "11:00").overlaps(empty));
    }

    #[test]
    fn durations() {
        assert_eq!(range("09:00", "11:30").duration_minutes(), 150);
        assert!((range("09:00", "11:30").duration_hours() - 2.5).abs() < f64::EPSILON);
        // Inverted endpoints degrade to zero rather than wrapping.
        assert_eq!(range("11:00", "09:00").duration_minutes(), 0);
    }
}
