//! CompletionBarrier - lets the dispatcher wait until every sink worker has exited

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{trace, warn};

/// Counts sink workers that are still active
///
/// Created together with one `CompletionGuard` per worker. Dropping a guard
/// decrements the count exactly once, so the release also happens when a
/// worker panics or its task is cancelled.
#[derive(Debug, Clone)]
pub struct CompletionBarrier {
    remaining: Arc<watch::Sender<usize>>,
}

/// Exit token held by one sink worker
#[derive(Debug)]
pub struct CompletionGuard {
    remaining: Arc<watch::Sender<usize>>,
}

impl CompletionBarrier {
    /// Create a barrier armed with `N` guards
    pub fn new<const N: usize>() -> (Self, [CompletionGuard; N]) {
        let remaining = Arc::new(watch::Sender::new(N));
        let guards = std::array::from_fn(|_| CompletionGuard {
            remaining: Arc::clone(&remaining),
        });
        (Self { remaining }, guards)
    }

    /// Number of guards not yet released
    pub fn remaining(&self) -> usize {
        *self.remaining.borrow()
    }

    /// Wait until every guard has been released
    pub async fn wait(&self) {
        let mut rx = self.remaining.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting
        if rx.wait_for(|n| *n == 0).await.is_err() {
            warn!("Completion barrier closed while waiting");
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.remaining.send_modify(|n| *n = n.saturating_sub(1));
        trace!(remaining = *self.remaining.borrow(), "Completion guard released");
    }
}
