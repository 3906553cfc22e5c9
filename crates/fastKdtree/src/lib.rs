//! Parallel k-d tree for exact nearest-neighbor and fixed-radius search.
//!
//! ## Purpose
//!
//! This crate implements a balanced k-d tree over points in a
//! fixed-dimension Euclidean space. The tree is built once (sequentially or
//! with bounded-depth fork-join parallelism) and is immutable afterwards;
//! every query is a pure reader, which makes batch queries trivially
//! data-parallel.
//!
//! ## Design notes
//!
//! * **Arena storage**: Nodes live in a single vector and reference their
//!   children by index, so no lifetime juggling and no dangling links.
//! * **Selection, not sorting**: Construction places each subtree median
//!   with `select_nth_unstable_by`, giving O(n) expected work per level.
//! * **Squared distances**: All comparisons use squared Euclidean distance;
//!   no square root is ever taken.
//! * **Parallelism**: `rayon` drives both parallel construction and batch
//!   querying, behind the `cpu` feature with sequential fallbacks.
//! * **Generics**: Generic over `Float` coordinate types and a const
//!   dimension `D` (`D >= 1`).
//!
//! ## Architecture
//!
//! ```text
//! Layer 5: API        (fluent builder)
//!   ↓
//! Layer 4: Engine     (query execution, batch passes)
//!   ↓
//! Layer 3: Tree       (node arena, construction)
//!   ↓
//! Layer 2: Math       (distance kernels)
//!   ↓
//! Layer 1: Primitives (errors)
//! ```
//!
//! ## Non-goals
//!
//! * This crate does not support insertion or deletion after construction.
//! * This crate does not support non-Euclidean or weighted metrics.
//! * This crate does not persist trees to storage.

#![allow(non_snake_case)]

/// Layer 5: Fluent construction API.
pub mod api;

/// Layer 4: Query execution engine.
pub mod engine;

/// Point input abstractions (slices, vectors, ndarray).
pub mod input;

/// Layer 2: Math kernels.
pub mod math;

/// Layer 1: Primitive types and errors.
pub mod primitives;

/// Layer 3: Tree structure and construction.
pub mod tree;

/// Commonly used types, re-exported for convenient glob import.
pub mod prelude {
    pub use crate::api::KdTreeBuilder;
    pub use crate::engine::executor::Neighborhood;
    pub use crate::input::PointInput;
    pub use crate::primitives::errors::{KdTreeError, KdTreeResult};
    pub use crate::tree::KdTree;
}
