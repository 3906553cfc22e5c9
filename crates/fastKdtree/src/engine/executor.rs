//! Query execution engine for the k-d tree.
//!
//! ## Purpose
//!
//! This module implements the two query operations — exact
//! nearest-neighbor search and fixed-radius neighbor enumeration — plus
//! their data-parallel batch forms. The tree is read-only during querying,
//! so batch queries distribute across worker threads with no shared
//! mutable state and no locking.
//!
//! ## Design notes
//!
//! * **Branch-and-bound**: Nearest-neighbor descends the near side first
//!   and prunes the far subtree once it provably cannot improve the best
//!   candidate.
//! * **Explicit accumulator**: The running best candidate is threaded
//!   through the recursion as a single `BestMatch` value, not a pair of
//!   out-parameters.
//! * **Dual-branch radius descent**: Radius search may have to visit both
//!   children — every qualifying point must be found, not just the
//!   closest — so each side is gated only by its own inclusion test.
//! * **Order-preserving batches**: Each batch result is written to the
//!   slot matching its query index, regardless of completion order.
//!
//! ## Invariants
//!
//! * All comparisons use squared distances.
//! * Batch preconditions are checked once up front; a batch never fails
//!   partially.
//!
//! ## Non-goals
//!
//! * This module does not support k-nearest (k > 1) queries.
//! * This module does not support query cancellation or timeouts.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::input::PointInput;
use crate::math::distance::distance_squared;
use crate::primitives::errors::{KdTreeError, KdTreeResult};
use crate::tree::KdTree;

// ============================================================================
// Neighborhood Structure
// ============================================================================

/// Result of a fixed-radius neighbor search.
///
/// `points[i]` lies within the search radius of the query point and
/// `distances[i]` is its squared Euclidean distance. When sorted output is
/// requested the pairs are in ascending distance order.
#[derive(Debug, Clone)]
pub struct Neighborhood<T, const D: usize> {
    /// Points within the search radius (the query point itself excluded).
    pub points: Vec<[T; D]>,

    /// Squared distance to each point (same order as `points`).
    pub distances: Vec<T>,
}

impl<T: Float, const D: usize> Neighborhood<T, D> {
    /// Create a new empty neighborhood.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            distances: Vec::new(),
        }
    }

    /// Number of neighbors found.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no neighbors were found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reorder the neighbors by ascending squared distance.
    ///
    /// A stable sort over an index permutation, then materialized; ties in
    /// distance keep their discovery order.
    pub fn sort_by_distance(&mut self) {
        if self.points.is_empty() {
            return;
        }

        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| {
            self.distances[a]
                .partial_cmp(&self.distances[b])
                .unwrap_or(Equal)
        });

        let points = order.iter().map(|&i| self.points[i]).collect();
        let distances = order.iter().map(|&i| self.distances[i]).collect();
        self.points = points;
        self.distances = distances;
    }
}

impl<T: Float, const D: usize> Default for Neighborhood<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Nearest-Neighbor Search
// ============================================================================

/// Running best candidate for nearest-neighbor search.
struct BestMatch<T> {
    node: usize,
    dist_sq: T,
}

impl<T: Float, const D: usize> KdTree<T, D> {
    /// Find the stored point closest to `query`.
    ///
    /// If several points tie exactly, any one of them may be returned.
    ///
    /// # Errors
    ///
    /// [`KdTreeError::EmptyTree`] if the tree was built from zero points.
    pub fn nearest(&self, query: &[T; D]) -> KdTreeResult<[T; D]> {
        let root = self.root.ok_or(KdTreeError::EmptyTree)?;
        Ok(self.nearest_from(root, query))
    }

    /// Nearest-neighbor search with the non-empty precondition already
    /// established.
    fn nearest_from(&self, root: usize, query: &[T; D]) -> [T; D] {
        let mut best = BestMatch {
            node: root,
            dist_sq: distance_squared(&self.nodes[root].point, query),
        };
        self.nearest_search(Some(root), query, 0, &mut best);
        self.nodes[best.node].point
    }

    fn nearest_search(
        &self,
        node: Option<usize>,
        query: &[T; D],
        axis: usize,
        best: &mut BestMatch<T>,
    ) {
        let Some(idx) = node else {
            return;
        };
        let kd_node = &self.nodes[idx];

        let dist = distance_squared(&kd_node.point, query);
        if dist < best.dist_sq {
            best.dist_sq = dist;
            best.node = idx;
        }

        // An exact hit cannot be improved on.
        if best.dist_sq == T::zero() {
            return;
        }

        let delta = kd_node.point[axis] - query[axis];
        let next_axis = (axis + 1) % D;

        let (near, far) = if delta > T::zero() {
            (kd_node.left, kd_node.right)
        } else {
            (kd_node.right, kd_node.left)
        };

        self.nearest_search(near, query, next_axis, best);

        // The far subtree cannot hold a closer point once the splitting
        // plane is at least as far away as the current best.
        if delta * delta >= best.dist_sq {
            return;
        }

        self.nearest_search(far, query, next_axis, best);
    }
}

// ============================================================================
// Radius Search
// ============================================================================

impl<T: Float, const D: usize> KdTree<T, D> {
    /// Find every stored point within `radius` of `query`, paired with its
    /// squared distance.
    ///
    /// A stored point at exactly distance `radius` is included. The query
    /// point itself, if stored, is excluded — a self-match at distance
    /// zero is never reported. With `sorted` the results are ordered by
    /// ascending squared distance.
    ///
    /// # Errors
    ///
    /// * [`KdTreeError::EmptyTree`] if the tree was built from zero points.
    /// * [`KdTreeError::NegativeRadius`] if `radius` is negative.
    pub fn within_radius(
        &self,
        query: &[T; D],
        radius: T,
        sorted: bool,
    ) -> KdTreeResult<Neighborhood<T, D>> {
        let root = self.root.ok_or(KdTreeError::EmptyTree)?;
        if radius < T::zero() {
            return Err(KdTreeError::NegativeRadius {
                radius: radius.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(self.radius_from(root, query, radius, sorted))
    }

    /// Radius search with all preconditions already established.
    fn radius_from(
        &self,
        root: usize,
        query: &[T; D],
        radius: T,
        sorted: bool,
    ) -> Neighborhood<T, D> {
        let mut found = Neighborhood::new();
        self.radius_search(Some(root), query, radius, 0, &mut found);
        if sorted {
            found.sort_by_distance();
        }
        found
    }

    fn radius_search(
        &self,
        node: Option<usize>,
        query: &[T; D],
        radius: T,
        axis: usize,
        found: &mut Neighborhood<T, D>,
    ) {
        let Some(idx) = node else {
            return;
        };
        let kd_node = &self.nodes[idx];

        let dist = distance_squared(&kd_node.point, query);
        if dist <= radius * radius && dist != T::zero() {
            found.points.push(kd_node.point);
            found.distances.push(dist);
        }

        // A subtree qualifies when the radius ball around the query
        // reaches past this node's splitting plane on that side.
        let left_subtree = query[axis] - radius < kd_node.point[axis];
        let right_subtree = query[axis] + radius > kd_node.point[axis];

        let next_axis = (axis + 1) % D;

        if left_subtree {
            self.radius_search(kd_node.left, query, radius, next_axis, found);
        }
        if right_subtree {
            self.radius_search(kd_node.right, query, radius, next_axis, found);
        }
    }
}

// ============================================================================
// Parallel Batch Passes
// ============================================================================

impl<T: Float + Send + Sync, const D: usize> KdTree<T, D> {
    /// Find the nearest stored point for each query point.
    ///
    /// Results are in query order: `output[i]` answers `queries[i]`.
    /// Queries are evaluated in parallel against the read-only tree.
    ///
    /// # Errors
    ///
    /// * [`KdTreeError::EmptyTree`] if the tree was built from zero points.
    /// * [`KdTreeError::EmptyQuerySet`] if `queries` holds no points.
    pub fn nearest_batch<I>(&self, queries: &I) -> KdTreeResult<Vec<[T; D]>>
    where
        I: PointInput<T, D> + ?Sized,
    {
        let query_rows = queries.as_point_rows()?;
        let root = self.root.ok_or(KdTreeError::EmptyTree)?;
        if query_rows.is_empty() {
            return Err(KdTreeError::EmptyQuerySet);
        }

        #[cfg(feature = "cpu")]
        let neighbors = query_rows
            .par_iter()
            .map(|query| self.nearest_from(root, query))
            .collect();

        #[cfg(not(feature = "cpu"))]
        let neighbors = query_rows
            .iter()
            .map(|query| self.nearest_from(root, query))
            .collect();

        Ok(neighbors)
    }

    /// Run a radius search for each query point.
    ///
    /// Results are in query order; each query yields its own (possibly
    /// empty) [`Neighborhood`]. Queries are evaluated in parallel against
    /// the read-only tree.
    ///
    /// # Errors
    ///
    /// * [`KdTreeError::EmptyTree`] if the tree was built from zero points.
    /// * [`KdTreeError::EmptyQuerySet`] if `queries` holds no points.
    /// * [`KdTreeError::NegativeRadius`] if `radius` is negative.
    pub fn within_radius_batch<I>(
        &self,
        queries: &I,
        radius: T,
        sorted: bool,
    ) -> KdTreeResult<Vec<Neighborhood<T, D>>>
    where
        I: PointInput<T, D> + ?Sized,
    {
        let query_rows = queries.as_point_rows()?;
        let root = self.root.ok_or(KdTreeError::EmptyTree)?;
        if query_rows.is_empty() {
            return Err(KdTreeError::EmptyQuerySet);
        }
        if radius < T::zero() {
            return Err(KdTreeError::NegativeRadius {
                radius: radius.to_f64().unwrap_or(f64::NAN),
            });
        }

        #[cfg(feature = "cpu")]
        let neighborhoods = query_rows
            .par_iter()
            .map(|query| self.radius_from(root, query, radius, sorted))
            .collect();

        #[cfg(not(feature = "cpu"))]
        let neighborhoods = query_rows
            .iter()
            .map(|query| self.radius_from(root, query, radius, sorted))
            .collect();

        Ok(neighborhoods)
    }
}
