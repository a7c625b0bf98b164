//! Cooperative cancellation shared between a caller and running pipelines.
//!
//! A [`CancellationToken`] is cloned into every invocation. The process runner
//! polls it while an external tool is running and kills the child when it
//! flips, and the pipeline checks it between stages.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{CoreError, CoreResult};

/// Cancellation flag backed by an [`AtomicBool`].
///
/// All clones observe the same flag, so a signal handler can cancel every
/// worker at once.
///
/// ```
/// use ffthumb_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let worker_token = token.clone();
/// token.cancel();
/// assert!(worker_token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns `Err(CoreError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> CoreResult<()> {
        if self.is_cancelled() {
            Err(CoreError::Cancelled)
        } else {
            Ok(())
        }
    }
}
