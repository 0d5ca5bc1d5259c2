//! liveboard-core - Core library for Liveboard
//!
//! This crate contains the shift models, conflict detection, timeline
//! layout, and per-date schedule cache used by all Liveboard frontends.

pub mod cache;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod timeline;

pub use error::{Error, Result};
pub use models::{Shift, ShiftId};
