//! Error types for k-d tree operations.
//!
//! ## Purpose
//!
//! This module defines the crate-wide error taxonomy. Every failure in this
//! crate stems from a precondition violation, reported synchronously to the
//! caller; there are no recoverable or retryable conditions, since the tree
//! performs no I/O and no external allocation beyond in-memory point
//! storage.
//!
//! ## Key concepts
//!
//! * **Empty tree**: A tree built from zero points is valid but rejects
//!   every query.
//! * **Atomic batch failure**: Batch preconditions are checked once up
//!   front, before any work is dispatched, so a batch never partially
//!   fails.

use std::fmt;

/// Result type for k-d tree operations.
pub type KdTreeResult<T> = Result<T, KdTreeError>;

/// Errors that can occur when constructing or querying a k-d tree.
#[derive(Debug, Clone, PartialEq)]
pub enum KdTreeError {
    /// A query was issued against a tree built from zero points.
    EmptyTree,

    /// A batch query was issued with zero query points.
    EmptyQuerySet,

    /// A radius search was given a negative search radius.
    NegativeRadius { radius: f64 },

    /// Input data could not be interpreted as points of the expected
    /// dimension (wrong row width, non-contiguous memory).
    InvalidInput(String),
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTree => {
                write!(f, "Tree is empty: build from a non-empty point set before querying")
            }
            Self::EmptyQuerySet => {
                write!(f, "No query points were provided")
            }
            Self::NegativeRadius { radius } => {
                write!(f, "Search radius must be non-negative, got {}", radius)
            }
            Self::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
        }
    }
}

impl std::error::Error for KdTreeError {}
