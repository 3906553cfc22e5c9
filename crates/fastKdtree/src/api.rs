//! High-level construction API.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point for building a k-d
//! tree: a fluent builder for choosing between parallel and sequential
//! construction.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults — parallel
//!   construction is on unless switched off.
//! * **Infallible core**: Any finite point collection (including the
//!   empty one) produces a valid tree; the only build-time failures come
//!   from input conversion (see [`PointInput`]).
//! * **Type-Safe**: Generic over `Float` coordinate types and the const
//!   dimension `D`.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`KdTreeBuilder`] via `KdTreeBuilder::new()`.
//! 2. Optionally chain `.parallel(false)` for a sequential build.
//! 3. Call `.build(&points)` to construct the tree.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::input::PointInput;
use crate::primitives::errors::KdTreeResult;
use crate::tree::{build, KdNode, KdTree};

/// Builder for k-d tree construction.
#[derive(Debug, Clone, Copy)]
pub struct KdTreeBuilder {
    parallel: bool,
}

impl KdTreeBuilder {
    /// Create a new builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * parallel: true
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Set whether construction uses fork-join parallelism.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build a tree from the given point collection.
    ///
    /// The points are copied into the node arena and reordered in place
    /// during partitioning; the stored multiset always equals the input.
    ///
    /// # Errors
    ///
    /// Only input-conversion failures ([`crate::primitives::errors::KdTreeError::InvalidInput`]);
    /// construction itself cannot fail for any finite input.
    pub fn build<T, const D: usize, I>(&self, points: &I) -> KdTreeResult<KdTree<T, D>>
    where
        T: Float + Send + Sync,
        I: PointInput<T, D> + ?Sized,
    {
        let rows = points.as_point_rows()?;
        let mut nodes: Vec<KdNode<T, D>> = rows.iter().map(|&point| KdNode::new(point)).collect();

        let root = if self.parallel {
            build::build_parallel(&mut nodes, 0, 0, 0, build::parallel_recursion_depth())
        } else {
            build::build_sequential(&mut nodes, 0, 0)
        };

        Ok(KdTree { nodes, root })
    }
}

impl Default for KdTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
