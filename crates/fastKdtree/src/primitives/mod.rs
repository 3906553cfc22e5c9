//! Layer 1: Primitives
//!
//! ## Purpose
//!
//! This layer provides the primitive types shared by every other layer,
//! currently the error taxonomy.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types for tree construction and querying.
pub mod errors;
