//! Per-key idle debouncing on tokio timers.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs a task once its key has been quiet for `delay`. Scheduling the same
/// key again cancels the previous timer.
pub struct Debouncer<K> {
    delay: Duration,
    pending: Mutex<HashMap<K, JoinHandle<()>>>,
}

impl<K: Eq + Hash> Debouncer<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn schedule<F>(&self, key: K, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.insert(key, handle) {
            previous.abort();
        }
    }

    /// Await every scheduled task that has not been superseded.
    pub async fn flush(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut pending = self
                .pending
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            pending.drain().map(|(_, handle)| handle).collect()
        };
        for handle in handles {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::warn!("debounced task failed: {e}");
                }
            }
        }
    }
}
