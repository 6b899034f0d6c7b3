//! Trailing-edge debounce for auto-save.
//!
//! Each [`Debouncer::schedule`] call replaces any pending action: the timer
//! restarts and only the newest action runs once the delay elapses
//! undisturbed. Must be called from within a tokio runtime.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

type Action = Box<dyn FnOnce() + Send + 'static>;

/// Trailing 1-second debounce, the auto-save default.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

struct Pending {
    timer: JoinHandle<()>,
    action: Arc<Mutex<Option<Action>>>,
}

/// Schedule-after-delay with cancel-on-superseding-call.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `action` to run after the configured delay, canceling any
    /// previously scheduled action.
    pub fn schedule(&self, action: impl FnOnce() + Send + 'static) {
        let slot: Arc<Mutex<Option<Action>>> = Arc::new(Mutex::new(Some(Box::new(action))));
        let delay = self.delay;

        let timer = {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let action = slot.lock().expect("debounce mutex poisoned").take();
                if let Some(action) = action {
                    action();
                }
            })
        };

        let previous = self
            .pending
            .lock()
            .expect("debounce mutex poisoned")
            .replace(Pending { timer, action: slot });
        if let Some(previous) = previous {
            previous.timer.abort();
        }
    }

    /// Runs the pending action immediately, if any, instead of waiting out
    /// the delay.
    pub fn flush(&self) {
        let pending = self.pending.lock().expect("debounce mutex poisoned").take();
        if let Some(pending) = pending {
            pending.timer.abort();
            let action = pending.action.lock().expect("debounce mutex poisoned").take();
            if let Some(action) = action {
                action();
            }
        }
    }

    /// Drops the pending action without running it.
    pub fn cancel(&self) {
        let pending = self.pending.lock().expect("debounce mutex poisoned").take();
        if let Some(pending) = pending {
            pending.timer.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn only_the_last_scheduled_action_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(30));
        let ran = Arc::new(AtomicUsize::new(0));

        for i in 1..=3 {
            let ran = Arc::clone(&ran);
            debouncer.schedule(move || {
                ran.store(i, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn flush_runs_pending_action_immediately() {
        let debouncer = Debouncer::new(Duration::from_secs(60));
        let ran = Arc::new(AtomicUsize::new(0));

        {
            let ran = Arc::clone(&ran);
            debouncer.schedule(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            });
        }

        debouncer.flush();
        assert_eq!(ran.load(Ordering::SeqCst), 1);

        // Flushing again is a no-op.
        debouncer.flush();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancel_drops_pending_action() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let ran = Arc::new(AtomicUsize::new(0));

        {
            let ran = Arc::clone(&ran);
            debouncer.schedule(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            });
        }

        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }
}
