//! Data models for Liveboard

mod brand;
mod clock;
mod day;
mod merged;
mod shift;

pub use brand::BrandColor;
pub use clock::{ClockTime, TimeRange, MINUTES_PER_DAY};
pub use day::{DayGroup, RoomId};
pub use merged::MergedShift;
pub use shift::{ModificationStatus, RoleClass, Shift, ShiftId};
