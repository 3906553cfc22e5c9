//! Parallel and sequential k-d tree construction.
//!
//! ## Purpose
//!
//! This module builds the node arena by recursive median partitioning.
//! Construction is parallelized at the top levels of recursion with
//! `rayon::join`, falling back to the sequential form once the fan-out
//! exceeds what the thread pool can service.
//!
//! ## Design notes
//!
//! * **Recursive Parallelism**: One branch is spawned, the other runs
//!   inline, joined before returning.
//! * **Depth Limit**: Fork-join stops at depth `floor(log2(threads))`,
//!   bounding outstanding subtasks to roughly the worker count.
//! * **Disjoint Ranges**: `split_at_mut` hands each recursive call a
//!   non-overlapping sub-slice, so no synchronization is needed beyond the
//!   join.
//! * **Median Splitting**: Balanced construction via
//!   `select_nth_unstable_by` — a selection, not a full sort.
//!
//! ## Invariants
//!
//! * Parallel and sequential construction answer queries identically
//!   (tree shapes may differ when coordinates tie on the splitting axis).
//! * The node for the range `[begin, end)` lives at arena slot
//!   `begin + (end - begin) / 2`.
//!
//! ## Non-goals
//!
//! * This module does not implement the search logic (see the engine
//!   layer).
//! * This module does not support dynamic updates.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::join;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::tree::KdNode;

/// Maximum fork-join recursion depth: `floor(log2(worker_threads))`.
///
/// Beyond this depth the number of outstanding tasks would exceed the
/// thread pool, so the builder drops to the sequential form.
#[cfg(feature = "cpu")]
pub(crate) fn parallel_recursion_depth() -> usize {
    let threads = rayon::current_num_threads().max(1);
    (threads as f64).log2().floor() as usize
}

#[cfg(not(feature = "cpu"))]
pub(crate) fn parallel_recursion_depth() -> usize {
    0
}

/// Partition `nodes` around its median on `axis` and split off the median
/// element, returning `(left, median, right, mid)`.
///
/// After this call the median element is the one that would occupy the
/// middle position under a full ascending sort by coordinate `axis`.
fn partition_median<T: Float, const D: usize>(
    nodes: &mut [KdNode<T, D>],
    axis: usize,
) -> (
    &mut [KdNode<T, D>],
    &mut KdNode<T, D>,
    &mut [KdNode<T, D>],
    usize,
) {
    let mid = nodes.len() / 2;
    nodes.select_nth_unstable_by(mid, |a, b| {
        a.point[axis].partial_cmp(&b.point[axis]).unwrap_or(Equal)
    });

    let (left, rest) = nodes.split_at_mut(mid);
    // `rest` is non-empty: mid < len for any non-empty slice.
    let (median, right) = rest.split_first_mut().expect("median slot exists");
    (left, median, right, mid)
}

/// Sequentially build the subtree for `nodes`, which starts at absolute
/// arena offset `offset`, splitting on `axis`.
///
/// Returns the absolute arena index of the subtree root, or `None` for an
/// empty range.
pub(crate) fn build_sequential<T: Float, const D: usize>(
    nodes: &mut [KdNode<T, D>],
    offset: usize,
    axis: usize,
) -> Option<usize> {
    if nodes.is_empty() {
        return None;
    }

    let (left, median, right, mid) = partition_median(nodes, axis);
    let next_axis = (axis + 1) % D;

    median.left = build_sequential(left, offset, next_axis);
    median.right = build_sequential(right, offset + mid + 1, next_axis);

    Some(offset + mid)
}

/// Build the subtree for `nodes` with fork-join parallelism down to
/// `max_depth`, then sequentially.
#[cfg(feature = "cpu")]
pub(crate) fn build_parallel<T: Float + Send + Sync, const D: usize>(
    nodes: &mut [KdNode<T, D>],
    offset: usize,
    axis: usize,
    depth: usize,
    max_depth: usize,
) -> Option<usize> {
    if depth > max_depth {
        return build_sequential(nodes, offset, axis);
    }

    if nodes.is_empty() {
        return None;
    }

    let (left, median, right, mid) = partition_median(nodes, axis);
    let next_axis = (axis + 1) % D;

    let (left_root, right_root) = join(
        || build_parallel(left, offset, next_axis, depth + 1, max_depth),
        || build_parallel(right, offset + mid + 1, next_axis, depth + 1, max_depth),
    );

    median.left = left_root;
    median.right = right_root;

    Some(offset + mid)
}

/// Fallback for builds without the `cpu` feature.
#[cfg(not(feature = "cpu"))]
pub(crate) fn build_parallel<T: Float + Send + Sync, const D: usize>(
    nodes: &mut [KdNode<T, D>],
    offset: usize,
    axis: usize,
    _depth: usize,
    _max_depth: usize,
) -> Option<usize> {
    build_sequential(nodes, offset, axis)
}
