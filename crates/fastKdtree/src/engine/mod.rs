//! Layer 4: Engine
//!
//! ## Purpose
//!
//! This layer executes queries against a built tree: nearest-neighbor and
//! radius search, in single-query and rayon-parallel batch forms.
//!
//! ## Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Tree
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Query execution: nearest-neighbor, radius search, batch passes.
pub mod executor;
