//! Overlap layout for one time-grid column.
//!
//! Pipeline: events are resolved into [`IntervalProxy`] values, put in render order
//! ([`sort_by_render`]), linked into an [`OverlapForest`], and measured by a
//! [`GeometryTable`]. The result is one [`StyledEvent`] per input event, in render order.
//!
//! # Examples
//!
//! ```
//! use timegrid::layout::{compute_layout, FnAccessors};
//! use timegrid::slots::LinearSlotMetrics;
//!
//! // (start, end) in ms; the column spans 0..100 ms.
//! let events = vec![(0_i64, 10_i64), (0, 10), (50, 60)];
//! let metrics = LinearSlotMetrics::new(0, 100).unwrap();
//! let accessors = FnAccessors::new(|e: &(i64, i64)| e.0, |e: &(i64, i64)| e.1);
//!
//! let styled = compute_layout(&events, 0, &metrics, &accessors).unwrap();
//! assert_eq!(styled.len(), 3);
//! // The disjoint event is pulled right behind the first cluster head.
//! assert_eq!(*styled[1].event, (50, 60));
//! assert_eq!(styled[1].style.width, 100.0);
//! assert_eq!(styled[2].style.x_offset, 50.0);
//! ```

pub mod collaborators;
pub mod forest;
pub mod geometry;
pub mod proxy;
pub mod render_order;

pub use collaborators::{EventAccessors, FnAccessors, SlotMetrics, SlotRange};
pub use forest::{ForestError, ForestNode, OverlapForest};
pub use geometry::{GeometryTable, NodeGeometry, FULL_WIDTH, OVERLAP_GROWTH};
pub use proxy::{build_proxies, IntervalProxy};
pub use render_order::sort_by_render;

use crate::model::error::LayoutError;
use serde::Serialize;
use tracing::debug;

/// Style attached to each event in the output.
///
/// `top`/`height` are copied from the slot metrics. `width`/`x_offset` are percentages of
/// the column width; `x_offset` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStyle {
    /// Vertical offset.
    pub top: f64,
    /// Vertical extent.
    pub height: f64,
    /// Horizontal extent in percent.
    pub width: f64,
    /// Horizontal offset in percent.
    pub x_offset: f64,
}

/// An input event paired with its computed style.
#[derive(Debug, PartialEq)]
pub struct StyledEvent<'a, E> {
    /// The original event.
    pub event: &'a E,
    /// Its geometry.
    pub style: EventStyle,
}

impl<E> Clone for StyledEvent<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for StyledEvent<'_, E> {}

/// Tunables for [`Layout::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    /// Two intervals starting less than this many milliseconds apart nest even when they do
    /// not overlap. Zero or negative disables the proximity rule.
    pub minimum_start_difference: i64,
}

impl LayoutOptions {
    /// Options with the given proximity threshold in milliseconds.
    pub fn new(minimum_start_difference: i64) -> Self {
        Self {
            minimum_start_difference,
        }
    }
}

/// A computed column layout with its intermediate structures.
///
/// Index `i` of [`Layout::proxies`], [`Layout::forest`] and [`Layout::geometry`] all refer
/// to the `i`-th event in render order.
#[derive(Debug)]
pub struct Layout<'a, E> {
    proxies: Vec<IntervalProxy<'a, E>>,
    forest: OverlapForest,
    geometry: GeometryTable,
}

impl<'a, E> Layout<'a, E> {
    /// Run the full layout pipeline over `events`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::SlotMetrics`] if the slot metrics reject any event's range.
    pub fn compute<A, S>(
        events: &'a [E],
        options: LayoutOptions,
        slot_metrics: &S,
        accessors: &A,
    ) -> Result<Self, LayoutError>
    where
        A: EventAccessors<E>,
        S: SlotMetrics<A::Value>,
    {
        let proxies = sort_by_render(build_proxies(events, accessors, slot_metrics)?);
        let forest = OverlapForest::build(&proxies, options.minimum_start_difference);
        let geometry = GeometryTable::resolve(&forest);

        debug!(
            events = proxies.len(),
            roots = forest.roots().count(),
            max_depth = geometry.nodes().iter().map(|n| n.depth).max().unwrap_or(0),
            "computed column layout"
        );

        Ok(Self {
            proxies,
            forest,
            geometry,
        })
    }

    /// Proxies in render order.
    pub fn proxies(&self) -> &[IntervalProxy<'a, E>] {
        &self.proxies
    }

    /// The overlap forest, indexed by render position.
    pub fn forest(&self) -> &OverlapForest {
        &self.forest
    }

    /// Resolved geometry, indexed by render position.
    pub fn geometry(&self) -> &GeometryTable {
        &self.geometry
    }

    /// Number of laid out events.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Whether no events were laid out.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Style of the event at render position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn style(&self, index: usize) -> EventStyle {
        let proxy = &self.proxies[index];
        let node = self.geometry.node(index);
        EventStyle {
            top: proxy.top,
            height: proxy.height,
            width: node.width,
            x_offset: node.x_offset.max(0.0),
        }
    }

    /// Styled events in render order.
    pub fn styled(&self) -> Vec<StyledEvent<'a, E>> {
        (0..self.proxies.len())
            .map(|index| StyledEvent {
                event: self.proxies[index].data,
                style: self.style(index),
            })
            .collect()
    }
}

/// Compute the styled column layout for `events`.
///
/// The output holds exactly one entry per input event, in render order (not input order).
/// `minimum_start_difference` is in the same unit as the slot metrics' timestamps (ms).
///
/// # Errors
///
/// Returns [`LayoutError::SlotMetrics`] if the slot metrics reject any event's range. No
/// partial result is produced.
pub fn compute_layout<'a, E, A, S>(
    events: &'a [E],
    minimum_start_difference: i64,
    slot_metrics: &S,
    accessors: &A,
) -> Result<Vec<StyledEvent<'a, E>>, LayoutError>
where
    A: EventAccessors<E>,
    S: SlotMetrics<A::Value>,
{
    let layout = Layout::compute(
        events,
        LayoutOptions::new(minimum_start_difference),
        slot_metrics,
        accessors,
    )?;
    Ok(layout.styled())
}
