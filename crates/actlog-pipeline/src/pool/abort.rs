//! Run-wide abort signal shared by every stage of the pool.
//!
//! A plain cancellation flag leaves a window between a saver checking it and
//! the save starting. [`Abort`] closes that window with a gate: every save
//! runs under a read permit, and [`Abort::trigger`] takes the write side
//! before cancelling. Once `trigger` returns, no save is running and none
//! can start.

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

#[derive(Clone, Debug, Default)]
pub struct Abort {
    token: CancellationToken,
    gate: Arc<RwLock<()>>,
}

impl Abort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the run has been aborted.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Grants permission to start one save, or `None` once the run is
    /// aborted. The save must finish before the permit is dropped.
    pub async fn save_permit(&self) -> Option<RwLockReadGuard<'_, ()>> {
        let permit = self.gate.read().await;
        if self.token.is_cancelled() {
            None
        } else {
            Some(permit)
        }
    }

    /// Aborts the run. Waits for saves already holding a permit to finish.
    ///
    /// Must not be called while holding a permit from [`Self::save_permit`].
    pub async fn trigger(&self) {
        let _exclusive = self.gate.write().await;
        self.token.cancel();
    }
}
