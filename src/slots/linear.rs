//! Linear slot metrics over raw millisecond timestamps.

use crate::layout::{SlotMetrics, SlotRange};
use crate::model::error::SlotMetricsError;

/// Maps `i64` millisecond timestamps onto a column spanning `[origin_ms, origin_ms + span_ms)`.
///
/// Nothing is clamped: values outside the span produce `top` below 0 or above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSlotMetrics {
    origin_ms: i64,
    span_ms: i64,
}

impl LinearSlotMetrics {
    /// Create metrics for a column starting at `origin_ms` and lasting `span_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotMetricsError::InvalidGrid`] if `span_ms` is not positive.
    pub fn new(origin_ms: i64, span_ms: i64) -> Result<Self, SlotMetricsError> {
        if span_ms <= 0 {
            return Err(SlotMetricsError::InvalidGrid {
                reason: format!("span must be positive (got {} ms)", span_ms),
            });
        }
        Ok(Self { origin_ms, span_ms })
    }

    /// Start of the column.
    pub fn origin_ms(&self) -> i64 {
        self.origin_ms
    }

    /// Length of the column.
    pub fn span_ms(&self) -> i64 {
        self.span_ms
    }

    fn percent(&self, position: f64) -> f64 {
        position / self.span_ms as f64 * 100.0
    }
}

impl SlotMetrics<i64> for LinearSlotMetrics {
    fn range(&self, start: i64, end: i64) -> Result<SlotRange, SlotMetricsError> {
        let start_position = start.saturating_sub(self.origin_ms) as f64;
        let end_position = end.saturating_sub(self.origin_ms) as f64;
        let top = self.percent(start_position);

        Ok(SlotRange {
            start: start_position,
            end: end_position,
            start_ms: start,
            end_ms: end,
            top,
            height: self.percent(end_position) - top,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_span() {
        assert!(LinearSlotMetrics::new(0, 0).is_err());
        assert!(LinearSlotMetrics::new(0, -5).is_err());
    }

    #[test]
    fn range_is_relative_to_origin() {
        let metrics = LinearSlotMetrics::new(1_000, 200).unwrap();
        let range = metrics.range(1_050, 1_150).unwrap();

        assert_eq!(range.start, 50.0);
        assert_eq!(range.end, 150.0);
        assert_eq!(range.start_ms, 1_050);
        assert_eq!(range.end_ms, 1_150);
        assert_eq!(range.top, 25.0);
        assert_eq!(range.height, 50.0);
    }

    #[test]
    fn inverted_range_has_negative_height() {
        let metrics = LinearSlotMetrics::new(0, 100).unwrap();
        let range = metrics.range(60, 40).unwrap();
        assert_eq!(range.height, -20.0);
    }
}
