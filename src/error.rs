//! Error types shared by both maps.

use thiserror::Error;

/// Failures reported by map operations and constructors.
///
/// Absent keys are not errors: lookups return `Option` and membership
/// tests return `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapError {
    /// The key is already stored; the map was left unchanged.
    #[error("key is already present in the map")]
    DuplicateKey,
    /// The operation needs at least one entry.
    #[error("map is empty")]
    Empty,
    /// A hashed map needs at least one bucket.
    #[error("table capacity must be non-zero")]
    ZeroCapacity,
    /// Maximum load factor must be finite and strictly positive.
    #[error("invalid maximum load factor {0}")]
    InvalidLoadFactor(f64),
}

/// A broken red-black or search-tree invariant, found by
/// [`OrderedMap::validate`](crate::OrderedMap::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RbViolation {
    #[error("root node is red")]
    RedRoot,
    #[error("red node has a red parent")]
    RedRedEdge,
    #[error("black height differs between subtrees ({left} vs {right})")]
    BlackHeightMismatch { left: usize, right: usize },
    #[error("parent link or child-side flag is inconsistent")]
    BrokenLink,
    #[error("keys are not in strictly ascending in-order sequence")]
    OutOfOrder,
}
