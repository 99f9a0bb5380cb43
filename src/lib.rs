//! timegrid
//!
//! Overlap-aware layout of events in a calendar time-grid column.
//!
//! The pure core lives in [`layout`]: it turns a day's events into per-event styles (top,
//! height, width, horizontal offset) so that overlapping events cascade side by side. The
//! remaining modules are the impure shell around it: slot metrics for a concrete day, event
//! input, configuration, logging, and output rendering.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod slots;
pub mod source;
pub mod view;

pub use layout::{compute_layout, EventStyle, Layout, LayoutOptions, StyledEvent};
pub use model::{AppError, CalendarEvent, CalendarEventAccessors};
