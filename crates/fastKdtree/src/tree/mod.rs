//! Layer 3: Tree
//!
//! ## Purpose
//!
//! This layer defines the k-d tree structure: a node arena with
//! index-linked children, plus its construction routines.
//!
//! ## Design notes
//!
//! * **Arena-and-index**: All nodes for one tree live in a single vector;
//!   children are `Option<usize>` indices into that vector, so the arena
//!   outlives every query by construction and no raw references exist.
//! * **In-place reordering**: The arena is the input point collection,
//!   permuted during construction; no point is duplicated or dropped.
//! * **Immutability**: Once built, the tree never changes.
//!
//! ## Invariants
//!
//! * Exactly N nodes exist for N input points; the stored point multiset
//!   equals the input multiset.
//! * For a node split on axis `a`, every left-subtree point has
//!   coordinate `a` less than or equal to the node's, and every
//!   right-subtree point has coordinate `a` greater than or equal to it.
//!
//! ## Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Tree ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Sequential and parallel recursive construction.
pub(crate) mod build;

// External dependencies
use num_traits::Float;
use std::fmt::LowerExp;

// Internal dependencies
use crate::api::KdTreeBuilder;
use crate::input::PointInput;
use crate::primitives::errors::KdTreeResult;

/// A node in the k-d tree arena.
#[derive(Debug, Clone)]
pub(crate) struct KdNode<T, const D: usize> {
    /// The stored point, owned by value.
    pub(crate) point: [T; D],
    /// Arena index of the left child, if any.
    pub(crate) left: Option<usize>,
    /// Arena index of the right child, if any.
    pub(crate) right: Option<usize>,
}

impl<T, const D: usize> KdNode<T, D> {
    pub(crate) fn new(point: [T; D]) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }
}

/// A balanced k-d tree over points in D-dimensional Euclidean space.
///
/// Built once from a point collection, immutable thereafter. All queries
/// go through the engine layer (`nearest`, `within_radius` and their batch
/// forms).
#[derive(Debug, Clone)]
pub struct KdTree<T, const D: usize> {
    pub(crate) nodes: Vec<KdNode<T, D>>,
    pub(crate) root: Option<usize>,
}

impl<T: Float + Send + Sync, const D: usize> KdTree<T, D> {
    /// Build a tree from a point collection with default settings
    /// (parallel construction).
    pub fn new<I>(points: &I) -> KdTreeResult<Self>
    where
        I: PointInput<T, D> + ?Sized,
    {
        KdTreeBuilder::new().build(points)
    }
}

impl<T: Float, const D: usize> KdTree<T, D> {
    /// Number of points stored in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every stored point, in arena order.
    pub fn points(&self) -> impl Iterator<Item = &[T; D]> {
        self.nodes.iter().map(|node| &node.point)
    }
}

impl<T: Float + LowerExp, const D: usize> KdTree<T, D> {
    /// Render the tree as an indented box-drawing diagram, one node per
    /// line with coordinates in two-digit scientific notation.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(&mut out, "", self.root, false);
        out
    }

    fn render_node(&self, out: &mut String, prefix: &str, node: Option<usize>, is_left: bool) {
        let Some(idx) = node else {
            return;
        };
        let kd_node = &self.nodes[idx];

        out.push_str(prefix);
        out.push_str(if is_left { "├──" } else { "└──" });

        out.push('(');
        for (dim, coordinate) in kd_node.point.iter().enumerate() {
            if dim > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{:.2e}", coordinate));
        }
        out.push_str(")\n");

        let child_prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
        self.render_node(out, &child_prefix, kd_node.left, true);
        self.render_node(out, &child_prefix, kd_node.right, false);
    }
}
