//! Seams between the layout core and the outside world.
//!
//! The core never looks inside an event. It asks an [`EventAccessors`] for the start and end
//! values and hands them to a [`SlotMetrics`], which turns them into geometry and comparable
//! timestamps.

use crate::model::error::SlotMetricsError;

/// Extracts start/end values from an opaque event record.
pub trait EventAccessors<E> {
    /// The time representation handed to the slot metrics.
    type Value;

    /// Start value of `event`.
    fn start(&self, event: &E) -> Self::Value;

    /// End value of `event`.
    fn end(&self, event: &E) -> Self::Value;
}

/// Resolves a start/end pair into column geometry.
pub trait SlotMetrics<V> {
    /// Resolve the range `[start, end)`.
    ///
    /// # Errors
    ///
    /// Implementations return `Err` when the pair cannot be converted into comparable
    /// timestamps. The layout call then fails as a whole.
    fn range(&self, start: V, end: V) -> Result<SlotRange, SlotMetricsError>;
}

/// Result of [`SlotMetrics::range`].
///
/// `start`/`end` are slot-relative positions, `start_ms`/`end_ms` are absolute milliseconds
/// since epoch (the only values used for overlap decisions), `top`/`height` are passed through
/// to the output unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRange {
    /// Slot-relative start position.
    pub start: f64,
    /// Slot-relative end position.
    pub end: f64,
    /// Absolute start, ms since epoch.
    pub start_ms: i64,
    /// Absolute end, ms since epoch.
    pub end_ms: i64,
    /// Vertical offset in percent of the column.
    pub top: f64,
    /// Vertical extent in percent of the column.
    pub height: f64,
}

/// Accessor pair built from two closures.
///
/// # Examples
///
/// ```
/// use timegrid::layout::{EventAccessors, FnAccessors};
///
/// struct Meeting { from: i64, to: i64 }
///
/// let accessors = FnAccessors::new(|m: &Meeting| m.from, |m: &Meeting| m.to);
/// let meeting = Meeting { from: 10, to: 20 };
/// assert_eq!(accessors.start(&meeting), 10);
/// assert_eq!(accessors.end(&meeting), 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnAccessors<S, T> {
    start: S,
    end: T,
}

impl<S, T> FnAccessors<S, T> {
    /// Wrap a start accessor and an end accessor.
    pub fn new(start: S, end: T) -> Self {
        Self { start, end }
    }
}

impl<E, V, S, T> EventAccessors<E> for FnAccessors<S, T>
where
    S: Fn(&E) -> V,
    T: Fn(&E) -> V,
{
    type Value = V;

    fn start(&self, event: &E) -> V {
        (self.start)(event)
    }

    fn end(&self, event: &E) -> V {
        (self.end)(event)
    }
}
