//! Cancellable debounce for a single-argument async action.
//!
//! Each [`Debouncer::call`] re-arms one timer task. When the timer expires
//! the action is spawned as its own task, so a later `call` or `cancel`
//! never aborts an action that has already started.
//!
//! Timers run on the caller's Tokio runtime, or on the runtime that was
//! current when the debouncer was built. With neither, calls are dropped.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Coalesces rapid calls into one delayed invocation.
pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    runtime: Option<Handle>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            action: Arc::new(move |arg| action(arg).boxed()),
            runtime: Handle::try_current().ok(),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| {
            warn!("Debouncer mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Schedule `arg`, replacing any invocation that has not fired yet.
    pub fn call(&self, arg: T) {
        let action = Arc::clone(&self.action);
        let delay = self.delay;

        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let Some(runtime) = Handle::try_current().ok().or_else(|| self.runtime.clone()) else {
            warn!("No Tokio runtime available, dropping debounced call");
            return;
        };

        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action(arg));
        }));
    }

    /// Drop the pending invocation, if any, without running it.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock_pending().take() {
            pending.abort();
        }
    }

    /// True while a timer is armed and has not fired.
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = match self.pending.get_mut() {
            Ok(pending) => pending,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
