//! Render order: a deterministic sequence that keeps overlap clusters contiguous.

use super::proxy::IntervalProxy;
use std::collections::VecDeque;

/// Reorder proxies for rendering.
///
/// Proxies are stable-sorted by start ascending, then end descending, so among equal starts
/// the longest interval comes first. The sequence is then drained front to back: after each
/// popped interval the first pending interval that starts at or after its end (the head of
/// the next cluster) is pulled up right behind it. Only the first such interval is
/// inspected, and the scan stops there even when it is already at the front.
pub fn sort_by_render<E>(proxies: Vec<IntervalProxy<'_, E>>) -> Vec<IntervalProxy<'_, E>> {
    let mut by_time = proxies;
    by_time.sort_by(|a, b| {
        a.start_ms
            .cmp(&b.start_ms)
            .then_with(|| b.end_ms.cmp(&a.end_ms))
    });

    let mut pending: VecDeque<_> = by_time.into();
    let mut sorted = Vec::with_capacity(pending.len());

    while let Some(event) = pending.pop_front() {
        let end_ms = event.end_ms;
        sorted.push(event);

        // Head of the next cluster; relocate it only when something sits in front of it.
        let next_group = pending.iter().position(|test| end_ms <= test.start_ms);
        if let Some(index) = next_group.filter(|&index| index > 0) {
            if let Some(next) = pending.remove(index) {
                sorted.push(next);
            }
        }
    }

    sorted
}
