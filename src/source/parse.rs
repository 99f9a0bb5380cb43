//! Decoding of event documents.
//!
//! Two layouts are accepted:
//! - a JSON array of event objects
//! - JSONL, one event object per line (blank lines are skipped)
//!
//! The layout is chosen by the first non-whitespace character.

use crate::model::error::ParseError;
use crate::model::CalendarEvent;

/// Decode all events in `input`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidEvent`] for the first record that fails to decode, with its
/// 1-based line number.
///
/// # Examples
///
/// ```
/// use timegrid::source::parse_events;
///
/// let jsonl = r#"{"title":"A","start":"2025-03-04T09:00:00","end":"2025-03-04T10:00:00"}"#;
/// let events = parse_events(jsonl).unwrap();
/// assert_eq!(events[0].title, "A");
/// ```
pub fn parse_events(input: &str) -> Result<Vec<CalendarEvent>, ParseError> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input).map_err(|e| ParseError::InvalidEvent {
            line: e.line(),
            message: e.to_string(),
        });
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| ParseError::InvalidEvent {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}
