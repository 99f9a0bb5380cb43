//! Tests for overlap forest construction.

use super::*;
use crate::layout::SlotRange;

/// Proxies for `(start_ms, end_ms)` pairs, taken as already being in render order.
fn proxies(ranges: &[(i64, i64)]) -> Vec<IntervalProxy<'_, (i64, i64)>> {
    ranges
        .iter()
        .map(|range| {
            IntervalProxy::from_range(
                SlotRange {
                    start: range.0 as f64,
                    end: range.1 as f64,
                    start_ms: range.0,
                    end_ms: range.1,
                    top: 0.0,
                    height: 0.0,
                },
                range,
            )
        })
        .collect()
}

fn build(ranges: &[(i64, i64)], minimum_start_difference: i64) -> OverlapForest {
    let forest = OverlapForest::build(&proxies(ranges), minimum_start_difference);
    forest.validate().expect("built forest should be valid");
    forest
}

#[test]
fn empty_input_builds_empty_forest() {
    let forest = build(&[], 0);
    assert!(forest.is_empty());
    assert!(forest.depths().is_empty());
}

#[test]
fn lone_interval_is_a_root_leaf() {
    let forest = build(&[(0, 10)], 0);

    assert_eq!(forest.len(), 1);
    assert_eq!(forest.parent(0), None);
    assert!(forest.node(0).is_leaf());
    assert_eq!(forest.depths(), vec![1]);
}

#[test]
fn identical_pair_nests_second_under_first() {
    let forest = build(&[(0, 10), (0, 10)], 0);

    assert_eq!(forest.parent(1), Some(0));
    assert_eq!(forest.children(0), &[1]);
    assert_eq!(forest.depths(), vec![2, 1]);
}

#[test]
fn disjoint_intervals_are_all_roots() {
    let forest = build(&[(0, 10), (10, 20), (30, 40)], 0);

    assert_eq!(forest.roots().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(forest.depths(), vec![1, 1, 1]);
}

#[test]
fn near_simultaneous_start_nests_without_overlap() {
    let forest = build(&[(0, 3), (5, 20)], 10);
    assert_eq!(forest.parent(1), Some(0));
}

#[test]
fn distant_start_does_not_nest_without_overlap() {
    let forest = build(&[(0, 3), (5, 20)], 2);
    assert_eq!(forest.parent(1), None);
    assert_eq!(forest.roots().count(), 2);
}

#[test]
fn start_difference_equal_to_threshold_does_not_nest() {
    let forest = build(&[(0, 3), (5, 20)], 5);
    assert_eq!(forest.parent(1), None);
}

#[test]
fn negative_threshold_never_matches_proximity() {
    let forest = build(&[(0, 3), (3, 20)], -100);
    assert_eq!(forest.parent(1), None);
}

#[test]
fn nested_chain_deepens_across_passes() {
    let forest = build(&[(0, 100), (10, 90), (20, 80)], 0);

    assert_eq!(forest.parent(1), Some(0));
    assert_eq!(forest.parent(2), Some(1));
    assert_eq!(forest.children(0), &[1]);
    assert_eq!(forest.children(1), &[2]);
    assert_eq!(forest.depths(), vec![3, 2, 1]);
}

#[test]
fn first_matching_root_wins() {
    // Render order may place a cluster head before an earlier-starting interval:
    // (5, 15) nests under both first-pass roots and takes the first one.
    let forest = build(&[(0, 10), (10, 12), (5, 15)], 0);

    assert_eq!(forest.parent(1), None);
    assert_eq!(forest.parent(2), Some(0));
    assert_eq!(forest.children(0), &[2]);
}

#[test]
fn later_pass_reparents_under_sibling() {
    let forest = build(&[(0, 20), (5, 30), (15, 16)], 0);

    assert_eq!(forest.parent(1), Some(0));
    // (15, 16) first lands under (0, 20), then moves under (5, 30) in the second pass.
    assert_eq!(forest.parent(2), Some(1));
    assert_eq!(forest.children(0), &[1]);
}

#[test]
fn reparenting_strips_listing_under_new_parents_parent() {
    let forest = build(&[(0, 100), (10, 90), (20, 80)], 0);

    // (20, 80) sat under (0, 100) next to (10, 90) before moving under it.
    assert!(!forest.children(0).contains(&2));
    assert_eq!(forest.attached_children(1).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn reparenting_keeps_listing_under_unrelated_former_parent() {
    // Pass 1: roots (0,10) and (10,20); (5,15) goes under the first, (12,14) under the second.
    // Pass 2: (5,15) is a root and (12,14) moves under it. (5,15) hangs off (0,10), so the
    // listing under (10,20) stays.
    let forest = build(&[(0, 10), (10, 20), (5, 15), (12, 14)], 0);

    assert_eq!(forest.parent(2), Some(0));
    assert_eq!(forest.parent(3), Some(2));
    assert_eq!(forest.children(0), &[2]);
    assert_eq!(forest.children(1), &[3]);
    assert_eq!(forest.children(2), &[3]);
    assert_eq!(forest.attached_children(1).count(), 0);
    assert_eq!(forest.depths(), vec![3, 2, 2, 1]);
}

#[test]
fn pre_order_follows_parent_links_only() {
    let forest = build(&[(0, 10), (10, 20), (5, 15), (12, 14)], 0);
    assert_eq!(forest.pre_order(), vec![0, 2, 3, 1]);
}

#[test]
fn inverted_interval_does_not_panic() {
    let forest = build(&[(10, 0), (5, 6)], 0);
    assert_eq!(forest.len(), 2);
}

#[test]
fn pre_order_visits_parents_first() {
    let forest = build(&[(0, 100), (10, 90), (20, 80), (200, 300)], 0);
    assert_eq!(forest.pre_order(), vec![0, 1, 2, 3]);
}

#[test]
fn validate_accepts_listing_under_former_parent() {
    let forest = OverlapForest {
        nodes: vec![
            ForestNode {
                parent: None,
                children: vec![2],
            },
            ForestNode {
                parent: None,
                children: vec![2],
            },
            ForestNode {
                parent: Some(1),
                children: vec![],
            },
        ],
    };

    assert_eq!(forest.validate(), Ok(()));
}

#[test]
fn validate_reports_child_missing_from_parent() {
    let forest = OverlapForest {
        nodes: vec![
            ForestNode {
                parent: None,
                children: vec![],
            },
            ForestNode {
                parent: Some(0),
                children: vec![],
            },
        ],
    };

    assert_eq!(
        forest.validate(),
        Err(ForestError::ChildCount { child: 1, count: 0 })
    );
}

#[test]
fn validate_reports_duplicate_child_entry() {
    let forest = OverlapForest {
        nodes: vec![
            ForestNode {
                parent: None,
                children: vec![1, 1],
            },
            ForestNode {
                parent: Some(0),
                children: vec![],
            },
        ],
    };

    assert_eq!(
        forest.validate(),
        Err(ForestError::DuplicateListing {
            child: 1,
            listed_under: 0,
            count: 2,
        })
    );
}

#[test]
fn validate_reports_cycle() {
    let forest = OverlapForest {
        nodes: vec![
            ForestNode {
                parent: Some(1),
                children: vec![1],
            },
            ForestNode {
                parent: Some(0),
                children: vec![0],
            },
        ],
    };

    assert!(matches!(forest.validate(), Err(ForestError::Cycle { .. })));
}

#[test]
fn validate_reports_dangling_link() {
    let forest = OverlapForest {
        nodes: vec![ForestNode {
            parent: Some(4),
            children: vec![],
        }],
    };

    assert_eq!(
        forest.validate(),
        Err(ForestError::DanglingLink { node: 0, target: 4 })
    );
}
