//! File logging for the `timegrid` binary.
//!
//! Layout output goes to stdout, so tracing events are written to a log file instead. The
//! level comes from `RUST_LOG` and defaults to `info`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "info";

/// Failures while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Cannot create log directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was requested.
        path: PathBuf,
        /// Why creation failed.
        #[source]
        source: std::io::Error,
    },

    /// The log path does not end in a file name.
    #[error("Log path {0:?} has no file name")]
    InvalidPath(PathBuf),

    /// Another global subscriber is already installed.
    #[error("A tracing subscriber is already installed")]
    SubscriberAlreadySet,
}

/// Split `log_path` into the directory to create and the file name to append to.
///
/// A bare file name logs into the current directory.
fn split_log_path(log_path: &Path) -> Result<(&Path, &OsStr), LoggingError> {
    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    Ok((directory, file_name))
}

/// Install the global tracing subscriber, appending to `log_path`.
///
/// # Errors
///
/// Returns [`LoggingError`] if the path has no file name, its directory cannot be created, or
/// a subscriber was installed earlier in the process.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(tracing_appender::rolling::never(directory, file_name))
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
