//! Domain model types.
//!
//! Event records as read from input, plus the error taxonomy.

pub mod calendar_event;
pub mod error;

pub use calendar_event::{CalendarEvent, CalendarEventAccessors};
pub use error::{AppError, InputError, LayoutError, ParseError, SlotMetricsError};
