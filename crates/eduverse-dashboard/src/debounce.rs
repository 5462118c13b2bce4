//! # Debouncer
//!
//! Delays a callback until calls have stopped arriving for a quiet window.
//! The search box uses it so a query runs once the user stops typing.
//!
//! ## Timeline
//! ```text
//!   call("s")   call("sp")   call("spr")
//!      │           │            │
//!      ▼           ▼            ▼
//!   ───●───────────●────────────●─────────────────────────►  time
//!      └─ timer ✗  └─ timer ✗   └────── window ──────┐
//!                                                    ▼
//!                                           callback("spr")
//! ```
//!
//! Every call replaces the pending value and restarts the window, so only
//! the most recent value is delivered. [`Debouncer::flush`] delivers it now;
//! [`Debouncer::cancel`] drops it. Dropping the debouncer cancels as well.
//!
//! Timers run on the tokio runtime; `call` must be made from inside one.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// The value waiting for the window to close, and the timer that will
/// deliver it.
struct Pending<T> {
    latest: Option<T>,
    timer: Option<JoinHandle<()>>,
    /// Bumped on every call so a stale timer knows it lost the race.
    generation: u64,
}

impl<T> Pending<T> {
    fn clear(&mut self) -> Option<T> {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        self.latest.take()
    }
}

/// Trailing-edge debouncer.
pub struct Debouncer<T> {
    window: Duration,
    callback: Callback<T>,
    pending: Arc<Mutex<Pending<T>>>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Creates a debouncer that invokes `callback` once `window` has passed
    /// without a new call.
    pub fn new<F>(window: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Debouncer {
            window,
            callback: Arc::new(callback),
            pending: Arc::new(Mutex::new(Pending {
                latest: None,
                timer: None,
                generation: 0,
            })),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records `value` and restarts the quiet window.
    pub async fn call(&self, value: T) {
        let mut pending = self.pending.lock().await;
        pending.clear();
        pending.latest = Some(value);
        let generation = pending.generation;

        let window = self.window;
        let shared = Arc::clone(&self.pending);
        let callback = Arc::clone(&self.callback);

        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;

            let value = {
                let mut pending = shared.lock().await;
                if pending.generation != generation {
                    return;
                }
                pending.timer = None;
                pending.latest.take()
            };

            if let Some(value) = value {
                trace!(generation, "Debounce window elapsed");
                callback(value);
            }
        }));
    }

    /// Delivers the pending value immediately. Returns whether there was one.
    pub async fn flush(&self) -> bool {
        let value = self.pending.lock().await.clear();
        match value {
            Some(value) => {
                debug!("Flushing debounced call");
                (self.callback)(value);
                true
            }
            None => false,
        }
    }

    /// Drops the pending value without delivering it. Returns whether there
    /// was one.
    pub async fn cancel(&self) -> bool {
        let cancelled = self.pending.lock().await.clear().is_some();
        if cancelled {
            debug!("Cancelled debounced call");
        }
        cancelled
    }

    /// Whether a value is waiting for the window to close.
    pub async fn is_pending(&self) -> bool {
        self.pending.lock().await.latest.is_some()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        // A timer holding the lock is about to finish on its own.
        if let Ok(mut pending) = self.pending.try_lock() {
            if let Some(timer) = pending.timer.take() {
                timer.abort();
            }
            pending.latest = None;
        }
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use tokio::time::sleep;

    fn recorder() -> (Arc<StdMutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: String| sink.lock().unwrap().push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_is_delivered() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), callback);

        debouncer.call("s".to_string()).await;
        sleep(Duration::from_millis(100)).await;
        debouncer.call("sp".to_string()).await;
        sleep(Duration::from_millis(100)).await;
        debouncer.call("spr".to_string()).await;

        sleep(Duration::from_millis(299)).await;
        assert!(seen.lock().unwrap().is_empty());
        assert!(debouncer.is_pending().await);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["spr".to_string()]);
        assert!(!debouncer.is_pending().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_fire() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(50), callback);

        debouncer.call("first".to_string()).await;
        sleep(Duration::from_millis(60)).await;
        debouncer.call("second".to_string()).await;
        sleep(Duration::from_millis(60)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_delivers_now() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_secs(1), callback);

        assert!(!debouncer.flush().await);

        debouncer.call("now".to_string()).await;
        assert!(debouncer.flush().await);
        assert_eq!(*seen.lock().unwrap(), vec!["now".to_string()]);

        // the aborted timer must not deliver a second time
        sleep(Duration::from_secs(2)).await;
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_value() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(200), callback);

        debouncer.call("typo".to_string()).await;
        assert!(debouncer.cancel().await);
        assert!(!debouncer.cancel().await);

        sleep(Duration::from_millis(500)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(200), callback);

        debouncer.call("orphan".to_string()).await;
        drop(debouncer);

        sleep(Duration::from_millis(500)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
