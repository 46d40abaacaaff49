//! Error handling and result types for fixed red-black tree operations.
//!
//! Every failure this crate can detect is a programming error: a full arena, a
//! stale or sentinel index, or a broken invariant. On the default path these are
//! handed to the tree's [`CheckingPolicy`](crate::CheckingPolicy), which aborts.
//! The `try_*` methods surface the same conditions as values of
//! [`FixedTreeError`] instead.

use thiserror::Error;

use crate::types::NodeIndex;

/// Error type for fixed red-black tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedTreeError {
    /// A new key was inserted while every slot of the arena was occupied.
    #[error("capacity exceeded: all {capacity} slots are occupied")]
    CapacityExceeded {
        /// Fixed capacity of the arena.
        capacity: usize,
    },

    /// An index did not name an occupied slot.
    #[error("invalid access: index {index} is not an occupied slot (size: {size})")]
    InvalidAccess {
        /// The offending index (may be the sentinel).
        index: NodeIndex,
        /// Number of occupied slots at the time of the access.
        size: usize,
    },

    /// A structural invariant did not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Key not found in the tree.
    #[error("key not found in tree")]
    KeyNotFound,
}

impl FixedTreeError {
    /// Create a CapacityExceeded error for an arena of the given capacity
    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::CapacityExceeded { capacity }
    }

    /// Create an InvalidAccess error for `index`
    pub fn invalid_access(index: NodeIndex, size: usize) -> Self {
        Self::InvalidAccess { index, size }
    }

    /// Create an InvariantViolation error with context
    pub fn invariant_violation(invariant: &str, details: &str) -> Self {
        Self::InvariantViolation(format!("{}: {}", invariant, details))
    }

    /// Check if this error is a capacity error
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }

    /// Check if this error is an access error
    pub fn is_access_error(&self) -> bool {
        matches!(self, Self::InvalidAccess { .. })
    }

    /// Check if this error reports a broken invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

/// Public result type for tree operations that may fail
pub type FixedTreeResult<T> = Result<T, FixedTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, FixedTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, FixedTreeError>;

/// Result extension trait for attaching context to invariant failures
pub trait TreeResultExt<T> {
    /// Prefix invariant-violation details with `context`
    fn with_context(self, context: &str) -> FixedTreeResult<T>;

    /// Prefix invariant-violation details with the name of an operation
    fn with_operation(self, operation: &str) -> FixedTreeResult<T>;
}

impl<T> TreeResultExt<T> for Result<T, FixedTreeError> {
    fn with_context(self, context: &str) -> FixedTreeResult<T> {
        self.map_err(|e| match e {
            FixedTreeError::InvariantViolation(msg) => {
                FixedTreeError::invariant_violation(context, &msg)
            }
            other => other,
        })
    }

    fn with_operation(self, operation: &str) -> FixedTreeResult<T> {
        self.with_context(&format!("after '{}'", operation))
    }
}
