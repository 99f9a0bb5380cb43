//! Overlap forest: which interval each interval nests under.
//!
//! Nodes are addressed by their position in render order. Each node stores its parent index
//! and owns the list of its child indices. When a later pass moves a node under one of its
//! former siblings, it is taken off the list of that sibling's parent. Any other earlier
//! listing stays behind: the node then appears under its parent and under a former parent,
//! and both lists count towards depth. Offsets only ever follow the parent link.

use super::proxy::IntervalProxy;
use thiserror::Error;
use tracing::trace;

/// One node of the [`OverlapForest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForestNode {
    parent: Option<usize>,
    children: Vec<usize>,
}

impl ForestNode {
    /// Index of the parent node, `None` for roots.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Child indices in attachment order.
    ///
    /// May hold nodes whose parent has since moved elsewhere.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Structural defect found by [`OverlapForest::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForestError {
    /// A link points outside the node table.
    #[error("node {node} links to missing node {target}")]
    DanglingLink {
        /// Node holding the link.
        node: usize,
        /// Out-of-range index.
        target: usize,
    },

    /// A node appears more than once in the same child list.
    #[error("node {child} is listed {count} times under {listed_under}")]
    DuplicateListing {
        /// Child node.
        child: usize,
        /// Node whose child list repeats it.
        listed_under: usize,
        /// Number of occurrences.
        count: usize,
    },

    /// A node is not listed exactly once in its parent's child list.
    #[error("node {child} appears {count} times under its parent")]
    ChildCount {
        /// Child node.
        child: usize,
        /// Number of occurrences in the parent's child list.
        count: usize,
    },

    /// Following child lists from a node leads back to it.
    #[error("node {node} is part of a cycle")]
    Cycle {
        /// A node on the cycle.
        node: usize,
    },
}

/// DFS marks for the child-list walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Open,
    Done,
}

/// Parent/children forest over intervals in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapForest {
    nodes: Vec<ForestNode>,
}

/// Whether `event` nests under the candidate parent `candidate`.
///
/// Either the candidate is still running when `event` starts, or both start within
/// `minimum_start_difference` of each other.
fn nests_under<E>(
    event: &IntervalProxy<'_, E>,
    candidate: &IntervalProxy<'_, E>,
    minimum_start_difference: i64,
) -> bool {
    if candidate.end_ms > event.start_ms {
        return true;
    }
    u64::try_from(minimum_start_difference)
        .is_ok_and(|threshold| event.start_ms.abs_diff(candidate.start_ms) < threshold)
}

impl OverlapForest {
    /// A forest of `len` unlinked roots.
    pub fn with_len(len: usize) -> Self {
        Self {
            nodes: vec![ForestNode::default(); len],
        }
    }

    /// Build the forest for intervals already in render order.
    ///
    /// Works in passes. Every pass walks the unsettled intervals in order; an interval that
    /// nests under none of this pass's roots becomes a root of the pass, otherwise it is
    /// attached under the first such root. Roots of a pass are settled, the rest go through
    /// another pass where they may in turn become parents. Building stops once a pass finds
    /// no roots.
    pub fn build<E>(events: &[IntervalProxy<'_, E>], minimum_start_difference: i64) -> Self {
        let mut forest = Self::with_len(events.len());
        let mut remaining: Vec<usize> = (0..events.len()).collect();
        let mut settled = vec![false; events.len()];
        let mut pass = 0usize;

        loop {
            let mut roots: Vec<usize> = Vec::new();

            for &index in &remaining {
                let event = &events[index];
                let parent = roots.iter().copied().find(|&candidate| {
                    nests_under(event, &events[candidate], minimum_start_difference)
                });

                match parent {
                    None => roots.push(index),
                    Some(parent) => forest.attach(index, parent),
                }
            }

            if roots.is_empty() {
                break;
            }

            for &root in &roots {
                settled[root] = true;
            }
            remaining.retain(|&index| !settled[index]);

            trace!(
                pass,
                roots = roots.len(),
                remaining = remaining.len(),
                "overlap forest pass complete"
            );
            pass += 1;
        }

        forest
    }

    /// Move `child` under `parent`.
    ///
    /// `child` is removed from the list of `parent`'s own parent, where it sat next to
    /// `parent` in the previous pass. A listing under any other node is left alone.
    pub(crate) fn attach(&mut self, child: usize, parent: usize) {
        if let Some(grandparent) = self.nodes[parent].parent {
            self.nodes[grandparent].children.retain(|&c| c != child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn node(&self, index: usize) -> &ForestNode {
        &self.nodes[index]
    }

    /// Parent of `index`, `None` for roots.
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes[index].parent
    }

    /// Children of `index` in attachment order, stale listings included.
    pub fn children(&self, index: usize) -> &[usize] {
        &self.nodes[index].children
    }

    /// Children of `index` whose parent link points back at it.
    pub fn attached_children(
        &self,
        index: usize,
    ) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.nodes[index]
            .children
            .iter()
            .copied()
            .filter(move |&child| self.nodes.get(child).and_then(|n| n.parent) == Some(index))
    }

    /// Root indices in ascending order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| index)
    }

    /// All nodes, parents before their descendants along parent links.
    ///
    /// Roots are visited in ascending order, attached children in attachment order.
    pub fn pre_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots().collect();
        stack.reverse();

        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.attached_children(index).rev());
        }

        order
    }

    /// Depth of every node: 1 for leaves, else one more than the deepest listed child.
    pub fn depths(&self) -> Vec<usize> {
        let mut depths = vec![1usize; self.nodes.len()];

        let (order, _) = self.listing_post_order();
        for index in order {
            let deepest = self.nodes[index]
                .children
                .iter()
                .filter_map(|&c| depths.get(c).copied())
                .max();
            if let Some(deepest) = deepest {
                depths[index] = deepest + 1;
            }
        }

        depths
    }

    /// Every node after all the nodes it lists, plus the first node found on a cycle.
    ///
    /// Edges that close a cycle or point outside the table are skipped.
    fn listing_post_order(&self) -> (Vec<usize>, Option<usize>) {
        let len = self.nodes.len();
        let mut visits = vec![Visit::New; len];
        let mut order = Vec::with_capacity(len);
        let mut cycle = None;

        for start in 0..len {
            if visits[start] != Visit::New {
                continue;
            }
            visits[start] = Visit::Open;
            let mut stack = vec![(start, 0usize)];

            while let Some((node, next)) = stack.last_mut() {
                let node = *node;
                match self.nodes[node].children.get(*next) {
                    Some(&child) => {
                        *next += 1;
                        match visits.get(child) {
                            Some(Visit::New) => {
                                visits[child] = Visit::Open;
                                stack.push((child, 0));
                            }
                            Some(Visit::Open) => {
                                cycle.get_or_insert(child);
                            }
                            Some(Visit::Done) | None => {}
                        }
                    }
                    None => {
                        visits[node] = Visit::Done;
                        order.push(node);
                        stack.pop();
                    }
                }
            }
        }

        (order, cycle)
    }

    /// Check the forest invariants.
    ///
    /// A node may stay listed under a former parent, but its current parent must list it
    /// exactly once, no list may repeat a node, and child lists must not form a cycle.
    ///
    /// # Errors
    ///
    /// Returns the first defect found as a [`ForestError`].
    pub fn validate(&self) -> Result<(), ForestError> {
        let len = self.nodes.len();

        for (index, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                if child >= len {
                    return Err(ForestError::DanglingLink {
                        node: index,
                        target: child,
                    });
                }
                let count = node.children.iter().filter(|&&c| c == child).count();
                if count > 1 {
                    return Err(ForestError::DuplicateListing {
                        child,
                        listed_under: index,
                        count,
                    });
                }
            }
            if let Some(parent) = node.parent {
                if parent >= len {
                    return Err(ForestError::DanglingLink {
                        node: index,
                        target: parent,
                    });
                }
                let count = self.nodes[parent]
                    .children
                    .iter()
                    .filter(|&&c| c == index)
                    .count();
                if count != 1 {
                    return Err(ForestError::ChildCount {
                        child: index,
                        count,
                    });
                }
            }
        }

        match self.listing_post_order() {
            (_, Some(node)) => Err(ForestError::Cycle { node }),
            (_, None) => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "forest_tests.rs"]
mod tests;
