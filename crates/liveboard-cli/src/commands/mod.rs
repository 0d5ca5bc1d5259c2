pub mod common;
pub mod conflicts;
pub mod fixture;
pub mod layout;
pub mod relocate;
