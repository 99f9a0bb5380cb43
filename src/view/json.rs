//! JSON output.

use crate::layout::{EventStyle, StyledEvent};
use crate::model::CalendarEvent;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One line of JSON output: the event and its style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRecord<'a> {
    /// Event title.
    pub title: &'a str,
    /// Event start.
    pub start: NaiveDateTime,
    /// Event end.
    pub end: NaiveDateTime,
    /// Computed style.
    pub style: EventStyle,
}

/// Records for `styled`, keeping render order.
pub fn layout_records<'a>(styled: &[StyledEvent<'a, CalendarEvent>]) -> Vec<LayoutRecord<'a>> {
    styled
        .iter()
        .map(|s| LayoutRecord {
            title: &s.event.title,
            start: s.event.start,
            end: s.event.end,
            style: s.style,
        })
        .collect()
}

/// Pretty-printed JSON array of [`LayoutRecord`]s.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn render_json(styled: &[StyledEvent<'_, CalendarEvent>]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&layout_records(styled))
}
