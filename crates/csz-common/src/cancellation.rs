//! Cooperative cancellation for long-running completion passes.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Returned when a cancellable operation observes a cancellation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationCancelled;

impl fmt::Display for OperationCancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation was cancelled")
    }
}

impl std::error::Error for OperationCancelled {}

/// Shared cancellation flag. Clones observe the same request.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    requested: Option<Arc<AtomicBool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken {
            requested: Some(Arc::new(AtomicBool::new(false))),
        }
    }

    /// A token that can never be cancelled.
    pub const fn none() -> Self {
        CancellationToken { requested: None }
    }

    pub fn cancel(&self) {
        if let Some(flag) = &self.requested {
            flag.store(true, Ordering::Release);
        }
    }

    #[inline]
    pub fn is_cancellation_requested(&self) -> bool {
        self.requested
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    #[inline]
    pub fn check(&self) -> Result<(), OperationCancelled> {
        if self.is_cancellation_requested() {
            Err(OperationCancelled)
        } else {
            Ok(())
        }
    }
}
