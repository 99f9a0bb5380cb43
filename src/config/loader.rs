//! Loading `config.toml` and resolving it against env vars and CLI flags.

use crate::model::error::SlotMetricsError;
use crate::slots::DaySlotMetrics;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Time format used for `day_start` / `day_end`.
const TIME_FORMAT: &str = "%H:%M";

/// Why a configuration could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("Cannot read config file {path}: {reason}")]
    ReadError {
        /// File that was opened.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Config file {path} is not valid: {reason}")]
    ParseError {
        /// File that was parsed.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A field has a value that cannot be used.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Contents of a `config.toml`.
///
/// All fields are optional - if not specified, defaults are used.
/// Corresponds to `~/.config/timegrid/config.toml`:
///
/// ```toml
/// day_start = "08:00"
/// day_end = "18:00"
/// step_minutes = 15
/// timeslots = 4
/// minimum_start_difference_minutes = 20
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// First visible time of the column, `HH:MM`.
    #[serde(default)]
    pub day_start: Option<String>,

    /// Last visible time of the column, `HH:MM`.
    #[serde(default)]
    pub day_end: Option<String>,

    /// Slot length in minutes.
    #[serde(default)]
    pub step_minutes: Option<u32>,

    /// Slots per labelled group.
    #[serde(default)]
    pub timeslots: Option<u32>,

    /// Proximity threshold in minutes; derived from the grid when absent.
    #[serde(default)]
    pub minimum_start_difference_minutes: Option<u32>,

    /// Preview width in terminal columns.
    #[serde(default)]
    pub preview_width: Option<u16>,

    /// Preview height in terminal rows.
    #[serde(default)]
    pub preview_height: Option<u16>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Effective settings for one run.
///
/// Built from defaults, then the config file, env vars and CLI flags, each overriding the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// First visible time of the column.
    pub day_start: NaiveTime,
    /// Last visible time of the column.
    pub day_end: NaiveTime,
    /// Slot length in minutes.
    pub step_minutes: u32,
    /// Slots per labelled group.
    pub timeslots: u32,
    /// Explicit proximity threshold in minutes, if any.
    pub minimum_start_difference_minutes: Option<u32>,
    /// Preview width.
    pub preview_width: u16,
    /// Preview height.
    pub preview_height: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::MIN,
            day_end: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN),
            step_minutes: 30,
            timeslots: 2,
            minimum_start_difference_minutes: None,
            preview_width: 60,
            preview_height: 24,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Slot metrics for `day` using the configured grid.
    ///
    /// # Errors
    ///
    /// Returns [`SlotMetricsError::InvalidGrid`] if the grid is unusable.
    pub fn slot_metrics(&self, day: NaiveDate) -> Result<DaySlotMetrics, SlotMetricsError> {
        DaySlotMetrics::new(
            day,
            self.day_start,
            self.day_end,
            self.step_minutes,
            self.timeslots,
        )
    }

    /// Proximity threshold in ms: the explicit setting, else the grid default.
    pub fn minimum_start_difference_ms(&self, metrics: &DaySlotMetrics) -> i64 {
        self.minimum_start_difference_minutes.map_or_else(
            || metrics.default_minimum_start_difference(),
            |minutes| i64::from(minutes) * 60_000,
        )
    }
}

/// Where logs go when the config file names no path.
///
/// Returns `~/.local/state/timegrid/timegrid.log` on Unix-like systems,
/// or the platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("timegrid").join("timegrid.log")
    } else {
        PathBuf::from("timegrid.log")
    }
}

/// Read and parse the config file at `path`.
///
/// A missing file yields `Ok(None)` so that defaults apply.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] or [`ConfigError::ParseError`] when the file exists
/// but cannot be used.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Location of the per-user config file.
///
/// Returns `~/.config/timegrid/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("timegrid").join("config.toml"))
}

/// Find and load the config file.
///
/// The first source that names a path wins:
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TIMEGRID_CONFIG` environment variable
/// 3. Default path `~/.config/timegrid/config.toml`
///
/// # Errors
///
/// Fails only when the chosen file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TIMEGRID_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: format!("expected HH:MM, got {:?} ({})", value, e),
    })
}

/// Layer `config_file` over [`ResolvedConfig::default`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if `day_start` or `day_end` is not `HH:MM`.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    Ok(ResolvedConfig {
        day_start: match config.day_start {
            Some(value) => parse_time("day_start", &value)?,
            None => defaults.day_start,
        },
        day_end: match config.day_end {
            Some(value) => parse_time("day_end", &value)?,
            None => defaults.day_end,
        },
        step_minutes: config.step_minutes.unwrap_or(defaults.step_minutes),
        timeslots: config.timeslots.unwrap_or(defaults.timeslots),
        minimum_start_difference_minutes: config
            .minimum_start_difference_minutes
            .or(defaults.minimum_start_difference_minutes),
        preview_width: config.preview_width.unwrap_or(defaults.preview_width),
        preview_height: config.preview_height.unwrap_or(defaults.preview_height),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Layer environment variables over `config`.
///
/// Checks for:
/// - `TIMEGRID_MIN_START_DIFF`: proximity threshold in minutes
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var("TIMEGRID_MIN_START_DIFF") {
        match value.trim().parse::<u32>() {
            Ok(minutes) => config.minimum_start_difference_minutes = Some(minutes),
            Err(e) => warn!(
                value = %value,
                error = %e,
                "Ignoring invalid TIMEGRID_MIN_START_DIFF"
            ),
        }
    }

    config
}

/// Layer command-line flags over `config`.
///
/// Flags sit at the top of the chain. `None` means the flag was not given and leaves the
/// value alone.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    min_start_diff_override: Option<u32>,
    width_override: Option<u16>,
    height_override: Option<u16>,
) -> ResolvedConfig {
    if let Some(minutes) = min_start_diff_override {
        config.minimum_start_difference_minutes = Some(minutes);
    }

    if let Some(width) = width_override {
        config.preview_width = width;
    }

    if let Some(height) = height_override {
        config.preview_height = height;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
