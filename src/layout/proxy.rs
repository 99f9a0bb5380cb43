//! Interval proxies: one per input event, carrying the resolved range.

use super::collaborators::{EventAccessors, SlotMetrics, SlotRange};
use crate::model::error::LayoutError;

/// An event together with its resolved time range and vertical geometry.
///
/// Tree links are not stored here; they live in [`super::OverlapForest`], indexed by the
/// proxy's position in render order.
#[derive(Debug)]
pub struct IntervalProxy<'a, E> {
    /// Slot-relative start position.
    pub start: f64,
    /// Slot-relative end position.
    pub end: f64,
    /// Absolute start in ms, used for all overlap comparisons.
    pub start_ms: i64,
    /// Absolute end in ms, used for all overlap comparisons.
    pub end_ms: i64,
    /// Vertical offset, passed through.
    pub top: f64,
    /// Vertical extent, passed through.
    pub height: f64,
    /// The original event.
    pub data: &'a E,
}

// Manual impls: `data` is a shared reference, so no bound on `E` is required.
impl<E> Clone for IntervalProxy<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for IntervalProxy<'_, E> {}

impl<'a, E> IntervalProxy<'a, E> {
    /// Wrap `data` with an already resolved range.
    pub fn from_range(range: SlotRange, data: &'a E) -> Self {
        Self {
            start: range.start,
            end: range.end,
            start_ms: range.start_ms,
            end_ms: range.end_ms,
            top: range.top,
            height: range.height,
            data,
        }
    }

    /// Resolve `data` through the accessors and slot metrics.
    ///
    /// # Errors
    ///
    /// Propagates the slot-metrics error, tagged with `index`.
    pub fn resolve<A, S>(
        data: &'a E,
        index: usize,
        accessors: &A,
        slot_metrics: &S,
    ) -> Result<Self, LayoutError>
    where
        A: EventAccessors<E>,
        S: SlotMetrics<A::Value>,
    {
        let range = slot_metrics
            .range(accessors.start(data), accessors.end(data))
            .map_err(|source| LayoutError::SlotMetrics { index, source })?;
        Ok(Self::from_range(range, data))
    }
}

/// Build one proxy per event, in input order.
///
/// # Errors
///
/// Fails on the first event the slot metrics cannot resolve; no partial list is returned.
pub fn build_proxies<'a, E, A, S>(
    events: &'a [E],
    accessors: &A,
    slot_metrics: &S,
) -> Result<Vec<IntervalProxy<'a, E>>, LayoutError>
where
    A: EventAccessors<E>,
    S: SlotMetrics<A::Value>,
{
    events
        .iter()
        .enumerate()
        .map(|(index, event)| IntervalProxy::resolve(event, index, accessors, slot_metrics))
        .collect()
}
