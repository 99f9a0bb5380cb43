//! Calendar event records.

use crate::layout::EventAccessors;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One event to place in a day column.
///
/// Timestamps are naive local datetimes, e.g. `"2025-03-04T09:30:00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Display title.
    pub title: String,
    /// Start of the event (inclusive).
    pub start: NaiveDateTime,
    /// End of the event (exclusive).
    pub end: NaiveDateTime,
}

impl CalendarEvent {
    /// Create a new event.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }
}

/// Accessor pair reading [`CalendarEvent::start`] and [`CalendarEvent::end`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarEventAccessors;

impl EventAccessors<CalendarEvent> for CalendarEventAccessors {
    type Value = NaiveDateTime;

    fn start(&self, event: &CalendarEvent) -> NaiveDateTime {
        event.start
    }

    fn end(&self, event: &CalendarEvent) -> NaiveDateTime {
        event.end
    }
}
