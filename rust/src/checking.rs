//! Checking policies: what a tree does when it detects a programming error.
//!
//! Capacity overflow, access through a stale or sentinel index, and (with the
//! `verify-invariants` feature) a broken red-black invariant are never
//! recovered from. The tree reports them to its [`CheckingPolicy`], which must
//! not return.

use std::panic::Location;

use tracing::error;

use crate::error::FixedTreeError;
use crate::types::NodeIndex;

/// Handler for fatal tree errors.
///
/// `location` is the caller of the public tree method that failed.
pub trait CheckingPolicy {
    fn violation(error: FixedTreeError, location: &'static Location<'static>) -> !;

    fn capacity_exceeded(capacity: usize, location: &'static Location<'static>) -> ! {
        Self::violation(FixedTreeError::capacity_exceeded(capacity), location)
    }

    fn invalid_access(index: NodeIndex, size: usize, location: &'static Location<'static>) -> ! {
        Self::violation(FixedTreeError::invalid_access(index, size), location)
    }

    fn invariant_violation(error: FixedTreeError, location: &'static Location<'static>) -> ! {
        Self::violation(error, location)
    }
}

/// Logs the error and aborts the process. The default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbortChecking;

impl CheckingPolicy for AbortChecking {
    fn violation(error: FixedTreeError, location: &'static Location<'static>) -> ! {
        error!(
            %error,
            file = location.file(),
            line = location.line(),
            "fixed red-black tree violation, aborting"
        );
        std::process::abort()
    }
}

/// Logs the error and panics with it.
///
/// Useful in tests, where `#[should_panic]` can observe the failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanicChecking;

impl CheckingPolicy for PanicChecking {
    fn violation(error: FixedTreeError, location: &'static Location<'static>) -> ! {
        error!(
            %error,
            file = location.file(),
            line = location.line(),
            "fixed red-black tree violation"
        );
        panic!("{} at {}", error, location)
    }
}
