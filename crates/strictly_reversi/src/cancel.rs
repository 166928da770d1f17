//! One-shot cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;
use tracing::{debug, instrument};

type Cleanup = Box<dyn FnOnce() + Send>;

struct Inner {
    cancelled: AtomicBool,
    on_cancel: Mutex<Option<Cleanup>>,
    notify: Notify,
}

/// A cancel flag plus a cleanup action, shared between the owner of a
/// pending operation and the operation itself.
///
/// Clones observe the same flag. The first [`cancel`](Self::cancel) runs the
/// cleanup action; later calls do nothing. Cancellation is cooperative: the
/// operation checks [`is_cancelled`](Self::is_cancelled) between steps, and
/// work done before the check stays done.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// Token with no cleanup action.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Token that runs `cleanup` when cancelled.
    pub fn with_cleanup(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self::build(Some(Box::new(cleanup)))
    }

    fn build(on_cancel: Option<Cleanup>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                on_cancel: Mutex::new(on_cancel),
                notify: Notify::new(),
            }),
        }
    }

    /// True once cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Cancels and runs the cleanup action. Idempotent.
    #[instrument(skip(self))]
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let cleanup = self
            .inner
            .on_cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(cleanup) = cleanup {
            cleanup();
        }
        self.inner.notify.notify_waiters();
        debug!("Token cancelled");
    }

    /// Completes once the token is cancelled.
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// True if both handles refer to the same token.
    pub fn same_as(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_cancel_runs_cleanup_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let token = CancellationToken::with_cleanup(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        token.clone().cancel();

        assert!(token.is_cancelled());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
        assert!(token.same_as(&other));
        assert!(!token.same_as(&CancellationToken::new()));
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiter() {
        let token = CancellationToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });
        tokio::task::yield_now().await;
        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancelled().await;
    }
}
