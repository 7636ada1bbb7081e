// Cooperative interruption for a run.
//
// A signal handler raises the token; the walker and the synchronizer poll it
// before every remote request and once more before reporting success.

use crate::error::{Result, SyncError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag, raised from a signal handler and polled between steps.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once the token has been raised.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SyncError::Interrupted)
        } else {
            Ok(())
        }
    }
}
