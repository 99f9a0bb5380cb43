//! Width and horizontal offset derived from forest position.
//!
//! All values are percentages of the column width. A node shares what its parent leaves
//! free: the parent's unstretched width plus offset is where the child starts. Interior
//! nodes split their available width evenly by depth, and may stretch into the overlap
//! region by [`OVERLAP_GROWTH`]; leaves always take everything that is left.

use super::forest::OverlapForest;

/// Full column width, in percent.
pub const FULL_WIDTH: f64 = 100.0;

/// Stretch factor applied to interior nodes for the cascaded look.
pub const OVERLAP_GROWTH: f64 = 1.7;

/// Resolved geometry of one forest node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    /// Depth of the subtree rooted here (1 for leaves).
    pub depth: usize,
    /// Width before stretching.
    pub no_overlap_width: f64,
    /// Rendered width.
    pub width: f64,
    /// Offset from the left edge of the column.
    pub x_offset: f64,
}

/// Geometry for every node of a forest, computed once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryTable {
    nodes: Vec<NodeGeometry>,
}

impl GeometryTable {
    /// Resolve the geometry of every node in `forest`.
    ///
    /// Depths come from a post-order pass; widths and offsets from a pre-order pass, so each
    /// node reads its parent's already resolved values.
    pub fn resolve(forest: &OverlapForest) -> Self {
        let depths = forest.depths();
        let mut nodes: Vec<NodeGeometry> = depths
            .iter()
            .map(|&depth| NodeGeometry {
                depth,
                no_overlap_width: FULL_WIDTH,
                width: FULL_WIDTH,
                x_offset: 0.0,
            })
            .collect();

        for index in forest.pre_order() {
            let x_offset = forest
                .parent(index)
                .map_or(0.0, |parent| {
                    nodes[parent].no_overlap_width + nodes[parent].x_offset
                });
            let available_width = FULL_WIDTH - x_offset;

            let interior = !forest.node(index).is_leaf();
            let node = &mut nodes[index];
            node.x_offset = x_offset;
            if interior {
                node.no_overlap_width = available_width / node.depth as f64;
                node.width = (node.no_overlap_width * OVERLAP_GROWTH).min(FULL_WIDTH);
            } else {
                node.no_overlap_width = available_width;
                node.width = available_width;
            }
        }

        Self { nodes }
    }

    /// Geometry of node `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn node(&self, index: usize) -> NodeGeometry {
        self.nodes[index]
    }

    /// All nodes, indexed like the forest.
    pub fn nodes(&self) -> &[NodeGeometry] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
