//! Layer 2: Math
//!
//! ## Purpose
//!
//! This layer provides the distance kernels used by tree construction and
//! querying.
//!
//! ## Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Tree
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Squared Euclidean distance.
pub mod distance;
