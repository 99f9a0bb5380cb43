//! Slot metrics for a single calendar day column.

use crate::layout::{SlotMetrics, SlotRange};
use crate::model::error::SlotMetricsError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

const MS_PER_MINUTE: i64 = 60_000;

/// A day column from `min` to `max`, divided into slots of `step` minutes grouped
/// `timeslots` at a time.
///
/// Ranges are clamped to the column. Positions are minutes from the column start, `top`
/// and `height` percentages of the column length, timestamps the clamped datetimes as
/// milliseconds since epoch (naive datetimes are read as UTC).
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use timegrid::layout::SlotMetrics;
/// use timegrid::slots::DaySlotMetrics;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let metrics = DaySlotMetrics::new(
///     day,
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     30,
///     2,
/// )
/// .unwrap();
///
/// let range = metrics
///     .range(day.and_hms_opt(13, 0, 0).unwrap(), day.and_hms_opt(14, 0, 0).unwrap())
///     .unwrap();
/// assert_eq!(range.top, 50.0);
/// assert_eq!(range.height, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlotMetrics {
    column_start: NaiveDateTime,
    column_end: NaiveDateTime,
    step: u32,
    timeslots: u32,
}

impl DaySlotMetrics {
    /// Create metrics for `day` between `min` and `max`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotMetricsError::InvalidGrid`] unless `max` is at least one minute after
    /// `min`, `step > 0` and `timeslots > 0`.
    pub fn new(
        day: NaiveDate,
        min: NaiveTime,
        max: NaiveTime,
        step: u32,
        timeslots: u32,
    ) -> Result<Self, SlotMetricsError> {
        if (max - min).num_minutes() < 1 {
            return Err(SlotMetricsError::InvalidGrid {
                reason: format!(
                    "day start {} must be at least a minute before day end {}",
                    min, max
                ),
            });
        }
        if step == 0 {
            return Err(SlotMetricsError::InvalidGrid {
                reason: "step must be at least one minute".to_string(),
            });
        }
        if timeslots == 0 {
            return Err(SlotMetricsError::InvalidGrid {
                reason: "timeslots must be at least one".to_string(),
            });
        }

        Ok(Self {
            column_start: day.and_time(min),
            column_end: day.and_time(max),
            step,
            timeslots,
        })
    }

    /// First instant of the column.
    pub fn column_start(&self) -> NaiveDateTime {
        self.column_start
    }

    /// Last instant of the column.
    pub fn column_end(&self) -> NaiveDateTime {
        self.column_end
    }

    /// Column length in minutes.
    pub fn total_minutes(&self) -> i64 {
        (self.column_end - self.column_start).num_minutes()
    }

    /// Number of `step`-minute slots, the last one possibly partial.
    pub fn slot_count(&self) -> usize {
        let minutes = self.total_minutes();
        usize::try_from(minutes.div_euclid(i64::from(self.step))).unwrap_or(0)
            + usize::from(minutes.rem_euclid(i64::from(self.step)) != 0)
    }

    /// Number of slot groups (`timeslots` slots each), the last one possibly partial.
    pub fn group_count(&self) -> usize {
        self.slot_count().div_ceil(self.timeslots as usize)
    }

    /// Start time of every slot group, formatted `HH:MM`.
    pub fn slot_labels(&self) -> Vec<String> {
        let group_minutes = i64::from(self.step) * i64::from(self.timeslots);
        (0..self.group_count())
            .map(|group| {
                let offset = Duration::minutes(group_minutes * group as i64);
                (self.column_start + offset).format("%H:%M").to_string()
            })
            .collect()
    }

    /// Proximity threshold matching the grid: half a slot group, rounded up, in ms.
    pub fn default_minimum_start_difference(&self) -> i64 {
        i64::from((self.step * self.timeslots).div_ceil(2)) * MS_PER_MINUTE
    }

    /// Whether `[start, end)` intersects the column.
    ///
    /// Zero-length events count when they sit inside the column.
    pub fn overlaps_column(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if start == end {
            return start >= self.column_start && start < self.column_end;
        }
        start < self.column_end && end > self.column_start
    }

    fn position(&self, at: NaiveDateTime) -> f64 {
        (at - self.column_start).num_seconds() as f64 / 60.0
    }

    fn clamp(&self, at: NaiveDateTime) -> NaiveDateTime {
        at.clamp(self.column_start, self.column_end)
    }
}

impl SlotMetrics<NaiveDateTime> for DaySlotMetrics {
    fn range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<SlotRange, SlotMetricsError> {
        let range_start = self.clamp(start);
        let range_end = self.clamp(end);

        let total = self.total_minutes() as f64;
        let start_position = self.position(range_start);
        let end_position = self.position(range_end);
        let top = start_position / total * 100.0;

        Ok(SlotRange {
            start: start_position,
            end: end_position,
            start_ms: range_start.and_utc().timestamp_millis(),
            end_ms: range_end.and_utc().timestamp_millis(),
            top,
            height: end_position / total * 100.0 - top,
        })
    }
}
