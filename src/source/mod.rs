//! Event input sources.
//!
//! Events come from a JSON / JSONL file or from piped stdin. Both are read once, completely,
//! and decoded at the boundary into [`CalendarEvent`] values.

use crate::model::error::{AppError, InputError};
use crate::model::CalendarEvent;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

pub mod parse;

pub use parse::parse_events;

/// Where events are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    /// A file on disk.
    File(PathBuf),
    /// Piped standard input.
    Stdin,
}

impl EventSource {
    /// Read and decode every event from the source.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Input`] on I/O failures and [`AppError::Parse`] on malformed
    /// records.
    pub fn read_events(&self) -> Result<Vec<CalendarEvent>, AppError> {
        let contents = match self {
            EventSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| match source.kind() {
                    std::io::ErrorKind::NotFound => InputError::FileNotFound { path: path.clone() },
                    _ => InputError::Io(source),
                })?
            }
            EventSource::Stdin => {
                let mut contents = String::new();
                std::io::stdin()
                    .read_to_string(&mut contents)
                    .map_err(InputError::Io)?;
                contents
            }
        };

        let events = parse_events(&contents)?;
        info!(source = ?self, events = events.len(), "Loaded events");
        Ok(events)
    }
}

/// Pick the event source.
///
/// A file argument wins; otherwise stdin is used when it is piped.
///
/// # Errors
///
/// Returns [`InputError::FileNotFound`] if the file does not exist, and
/// [`InputError::NoInput`] if there is no file and stdin is an interactive terminal.
pub fn detect_event_source(file: Option<PathBuf>) -> Result<EventSource, InputError> {
    match file {
        Some(path) if !path.exists() => Err(InputError::FileNotFound { path }),
        Some(path) => Ok(EventSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(EventSource::Stdin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn detect_rejects_missing_file() {
        let result = detect_event_source(Some(PathBuf::from("/nonexistent/events.json")));
        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }

    #[test]
    fn file_source_reads_all_events() {
        let test_file = std::env::temp_dir().join("timegrid_source_read_all.jsonl");
        let content = r#"{"title":"A","start":"2025-03-04T09:00:00","end":"2025-03-04T10:00:00"}
{"title":"B","start":"2025-03-04T09:30:00","end":"2025-03-04T10:30:00"}
"#;
        fs::write(&test_file, content).unwrap();

        let source = detect_event_source(Some(test_file.clone())).unwrap();
        let events = source.read_events();
        let _ = fs::remove_file(&test_file);

        let events = events.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "A");
        assert_eq!(events[1].title, "B");
    }

    #[test]
    fn file_source_reports_parse_errors() {
        let test_file = std::env::temp_dir().join("timegrid_source_bad.jsonl");
        fs::write(&test_file, "{\"title\":\"A\"}\n").unwrap();

        let result = EventSource::File(test_file.clone()).read_events();
        let _ = fs::remove_file(&test_file);

        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn vanished_file_maps_to_file_not_found() {
        let result = EventSource::File(PathBuf::from("/nonexistent/gone.json")).read_events();
        assert!(matches!(
            result,
            Err(AppError::Input(InputError::FileNotFound { .. }))
        ));
    }
}
