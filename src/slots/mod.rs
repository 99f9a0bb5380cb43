//! Slot metrics: concrete collaborators that turn event times into column geometry.
//!
//! - [`DaySlotMetrics`] - one calendar day split into slots of `step` minutes
//! - [`LinearSlotMetrics`] - raw millisecond timestamps over a fixed span

pub mod day;
pub mod linear;

pub use day::DaySlotMetrics;
pub use linear::LinearSlotMetrics;
