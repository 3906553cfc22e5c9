//! Point input abstractions.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction over point collections,
//! letting construction and batch queries accept multiple data formats
//! (slices, vectors, ndarray matrices) through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Every implementation hands out a direct row view of
//!   the underlying buffer; nothing is cloned.
//! * **Fail-fast validation**: ndarray inputs are checked for memory
//!   continuity and row width before any tree work starts.
//!
//! ## Invariants
//!
//! * Returned rows represent all points in the input container, in input
//!   order.
//! * ndarray inputs must be contiguous with exactly `D` columns;
//!   anything else returns an error.
//!
//! ## Non-goals
//!
//! * This module does not reshape, project, or clean input data.

// Feature-gated imports
#[cfg(feature = "cpu")]
use ndarray::{ArrayBase, Data, Ix2};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::{KdTreeError, KdTreeResult};

/// Trait for collections usable as k-d tree points or batch queries.
pub trait PointInput<T: Float, const D: usize> {
    /// View the input as a slice of D-dimensional rows.
    fn as_point_rows(&self) -> KdTreeResult<&[[T; D]]>;
}

impl<T: Float, const D: usize> PointInput<T, D> for [[T; D]] {
    fn as_point_rows(&self) -> KdTreeResult<&[[T; D]]> {
        Ok(self)
    }
}

impl<T: Float, const D: usize> PointInput<T, D> for Vec<[T; D]> {
    fn as_point_rows(&self) -> KdTreeResult<&[[T; D]]> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, const D: usize, S> PointInput<T, D> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_point_rows(&self) -> KdTreeResult<&[[T; D]]> {
        if self.ncols() != D {
            return Err(KdTreeError::InvalidInput(format!(
                "expected {} columns per point, got {}",
                D,
                self.ncols()
            )));
        }

        let flat = self.as_slice().ok_or_else(|| {
            KdTreeError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })?;

        // SAFETY: `[T; D]` has the same layout and alignment as D
        // consecutive `T` values, and the column check above guarantees
        // `flat.len()` is an exact multiple of D.
        let rows = unsafe {
            core::slice::from_raw_parts(flat.as_ptr().cast::<[T; D]>(), flat.len() / D)
        };
        Ok(rows)
    }
}
