//! Squared Euclidean distance between fixed-dimension points.
//!
//! ## Purpose
//!
//! Every comparison in this crate is made on squared distances, avoiding
//! square-root computation entirely. The reported radius-search distances
//! are therefore squared as well.

// External dependencies
use num_traits::Float;

/// Squared Euclidean distance between two D-dimensional points.
#[inline]
pub fn distance_squared<T: Float, const D: usize>(a: &[T; D], b: &[T; D]) -> T {
    let mut dist = T::zero();
    for dim in 0..D {
        let delta = a[dim] - b[dim];
        dist = dist + delta * delta;
    }
    dist
}
