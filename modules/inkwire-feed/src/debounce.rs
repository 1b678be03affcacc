//! Trailing-edge debounce on the tokio timer.
//!
//! Re-arming aborts the previously scheduled action, so only the last
//! call within a quiet window runs. Used for search-as-you-type and
//! visibility recomputation bursts.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::AbortHandle;

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action` to run after the quiet window, cancelling any
    /// previously scheduled action that has not fired yet.
    pub fn call<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action().await;
        });
        let mut pending = self.pending.lock().expect("debouncer lock poisoned");
        if let Some(previous) = pending.replace(handle.abort_handle()) {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn only_last_call_in_burst_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let fired = Arc::new(AtomicUsize::new(0));

        for marker in [1usize, 2, 3] {
            let fired = fired.clone();
            debouncer.call(move || async move {
                fired.store(marker, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 3, "only the last scheduled action fired");
    }

    #[tokio::test]
    async fn separated_calls_both_run() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let count = count.clone();
            debouncer.call(move || async move {
                count.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(40)).await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
