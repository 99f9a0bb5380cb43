//! Error types for timegrid.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`], which is what the binary reports.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping all domain-specific failures
//!   - [`InputError`] - Event file/stdin reading failures
//!   - [`ParseError`] - Event JSON / JSONL decoding failures
//!   - [`LayoutError`] - Layout computation failures (a collaborator refused a range)
//!   - [`SlotMetricsError`] - Invalid time-grid definitions or unresolvable ranges
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!
//! The layout core itself never fails on odd numbers: negative-length intervals, equal
//! timestamps, and negative thresholds all produce a complete result. The only way a layout
//! call fails is a slot-metrics collaborator returning an error, and then no partial output
//! is produced.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use timegrid::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _events = read_events()?;
///     Ok(())
/// }
/// # fn read_events() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read event input from file or stdin.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Event input could not be decoded.
    #[error("Failed to parse events: {0}")]
    Parse(#[from] ParseError),

    /// Layout computation failed.
    #[error("Failed to compute layout: {0}")]
    Layout(#[from] LayoutError),

    /// The configured time grid is unusable.
    #[error("Invalid time grid: {0}")]
    SlotMetrics(#[from] SlotMetricsError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when reading event input from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified event file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use timegrid::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No file argument was given and stdin is an interactive terminal.
    #[error("No input provided. Usage: timegrid <file> or pipe events via stdin")]
    NoInput,

    /// Generic I/O failure while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors decoding event records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A JSON document or JSONL line is not a valid event.
    #[error("Invalid event at line {line}: {message}")]
    InvalidEvent {
        /// 1-based line number where decoding failed.
        line: usize,
        /// Decoder message.
        message: String,
    },
}

/// Errors produced by a slot-metrics collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlotMetricsError {
    /// The grid definition cannot produce any slots.
    #[error("Invalid time grid: {reason}")]
    InvalidGrid {
        /// What is wrong with the grid.
        reason: String,
    },

    /// A start/end pair could not be converted into a range.
    #[error("Cannot resolve range: {reason}")]
    UnresolvableRange {
        /// Why the range could not be resolved.
        reason: String,
    },
}

/// Errors from the layout orchestrator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The slot-metrics collaborator rejected the range of one event.
    #[error("Slot metrics failed for event #{index}: {source}")]
    SlotMetrics {
        /// Input position of the offending event.
        index: usize,
        /// The collaborator error.
        #[source]
        source: SlotMetricsError,
    },
}
