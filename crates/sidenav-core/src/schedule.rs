//! One-shot deferred execution.
//!
//! The settle delay before each adjustment is an explicit scheduled
//! task rather than an ad-hoc sleep, so it can be cancelled and tests
//! can drive it with tokio's paused clock.

use std::time::Duration;

use tokio::task::JoinHandle;

/// A job scheduled to run once after a delay. Dropping the handle does
/// not cancel the job; once spawned it fires unless `cancel` is called.
#[derive(Debug)]
pub struct DeferredTask {
    handle: JoinHandle<()>,
}

impl DeferredTask {
    /// Schedule `job` to run after `delay` on the current runtime
    pub fn spawn<F>(delay: Duration, job: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job();
        });
        Self { handle }
    }

    /// Abort the job if it has not fired yet
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the job to fire or be cancelled
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = DeferredTask::spawn(Duration::from_millis(100), move || {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::advance(Duration::from_millis(99)).await;
        tokio::task::yield_now().await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::advance(Duration::from_millis(2)).await;
        task.join().await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = DeferredTask::spawn(Duration::from_millis(100), move || {
            flag.store(true, Ordering::SeqCst);
        });

        task.cancel();
        tokio::time::advance(Duration::from_millis(200)).await;
        task.join().await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_handle_does_not_cancel() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        drop(DeferredTask::spawn(Duration::from_millis(50), move || {
            flag.store(true, Ordering::SeqCst);
        }));

        // Let the spawned task register its sleep before moving the clock
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(60)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(fired.load(Ordering::SeqCst));
    }
}
