//! Property-based tests for layout invariants.
//!
//! Tests validate:
//! 1. Every input event appears exactly once in the output
//! 2. Horizontal geometry stays inside the column
//! 3. The overlap forest is well formed
//! 4. Layout is a pure function of its input

use proptest::prelude::*;
use timegrid::layout::{
    build_proxies, compute_layout, sort_by_render, EventAccessors, FnAccessors, Layout,
    LayoutOptions,
};
use timegrid::slots::LinearSlotMetrics;

/// (id, start, end) in ms.
type Span = (usize, i64, i64);

fn accessors() -> impl EventAccessors<Span, Value = i64> {
    FnAccessors::new(|s: &Span| s.1, |s: &Span| s.2)
}

fn metrics() -> LinearSlotMetrics {
    LinearSlotMetrics::new(0, 1_440).expect("positive span")
}

/// Up to 40 events with start in `[0, 1440)` and a length of `-30..240`.
fn spans() -> impl Strategy<Value = Vec<Span>> {
    prop::collection::vec((0i64..1_440, -30i64..240), 0..40).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(id, (start, length))| (id, start, start + length))
            .collect()
    })
}

proptest! {
    #[test]
    fn every_event_is_emitted_exactly_once(events in spans(), threshold in -60i64..120) {
        let styled = compute_layout(&events, threshold, &metrics(), &accessors()).unwrap();

        let mut ids: Vec<usize> = styled.iter().map(|s| s.event.0).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..events.len()).collect::<Vec<_>>());
    }

    #[test]
    fn horizontal_geometry_stays_in_column(events in spans(), threshold in -60i64..120) {
        let styled = compute_layout(&events, threshold, &metrics(), &accessors()).unwrap();

        for s in &styled {
            prop_assert!(s.style.x_offset >= 0.0, "negative offset: {:?}", s.style);
            prop_assert!(s.style.x_offset < 100.0, "offset past column: {:?}", s.style);
            prop_assert!(s.style.width > 0.0, "empty width: {:?}", s.style);
            prop_assert!(s.style.width <= 100.0, "width past column: {:?}", s.style);
        }
    }

    #[test]
    fn overlap_forest_is_well_formed(events in spans(), threshold in -60i64..120) {
        let layout = Layout::compute(
            &events,
            LayoutOptions::new(threshold),
            &metrics(),
            &accessors(),
        )
        .unwrap();

        prop_assert!(layout.forest().validate().is_ok(), "{:?}", layout.forest().validate());
        prop_assert_eq!(layout.forest().len(), events.len());

        let mut visited = layout.forest().pre_order();
        visited.sort_unstable();
        prop_assert_eq!(visited, (0..events.len()).collect::<Vec<_>>());

        let depths = layout.forest().depths();
        for index in 0..layout.len() {
            let children = layout.forest().children(index);
            let expected = children.iter().map(|&c| depths[c] + 1).max().unwrap_or(1);
            prop_assert_eq!(depths[index], expected);
        }
    }

    #[test]
    fn layout_is_deterministic(events in spans(), threshold in -60i64..120) {
        let first = compute_layout(&events, threshold, &metrics(), &accessors()).unwrap();
        let second = compute_layout(&events, threshold, &metrics(), &accessors()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn render_order_is_a_permutation(events in spans()) {
        let proxies = build_proxies(&events, &accessors(), &metrics()).unwrap();
        let ordered = sort_by_render(proxies);

        let mut ids: Vec<usize> = ordered.iter().map(|p| p.data.0).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..events.len()).collect::<Vec<_>>());
    }

    #[test]
    fn isolated_events_fill_the_column(starts in prop::collection::btree_set(0i64..100, 1..10)) {
        // Ten-unit gaps at least: no two events overlap, and a zero threshold keeps them apart.
        let events: Vec<Span> = starts
            .into_iter()
            .enumerate()
            .map(|(id, slot)| (id, slot * 20, slot * 20 + 10))
            .collect();

        let styled = compute_layout(&events, 0, &metrics(), &accessors()).unwrap();
        for s in &styled {
            prop_assert_eq!(s.style.width, 100.0);
            prop_assert_eq!(s.style.x_offset, 0.0);
        }
    }
}
