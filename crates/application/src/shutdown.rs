//! One-shot shutdown signal.
//!
//! The [`ShutdownTrigger`] is the single writer and is not `Clone`; any
//! number of [`ShutdownSignal`] readers may observe or wait on it. Once
//! fired the signal is never cleared.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Inner {
    set: Mutex<bool>,
    cond: Condvar,
}

/// Read side of the shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

/// Write side of the shutdown flag.
#[derive(Debug)]
pub struct ShutdownTrigger {
    inner: Arc<Inner>,
}

impl ShutdownTrigger {
    /// Creates an unset trigger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner::default()),
        }
    }

    /// Returns a reader bound to this trigger.
    #[must_use]
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Sets the flag and wakes every waiter.
    ///
    /// Returns `true` only for the call that actually set it.
    pub fn fire(&self) -> bool {
        let mut set = self
            .inner
            .set
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let first = !*set;
        *set = true;
        drop(set);
        self.inner.cond.notify_all();
        first
    }

    /// Returns true once fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.signal().is_set()
    }
}

impl Default for ShutdownTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Returns true once shutdown was requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        *self
            .inner
            .set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits up to `timeout` for the signal.
    ///
    /// Returns `true` if the signal is set, `false` on timeout.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut set = self
            .inner
            .set
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        while !*set {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .inner
                .cond
                .wait_timeout(set, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            set = guard;
        }
        true
    }

    /// Blocks until the signal is set.
    pub fn wait(&self) {
        let mut set = self
            .inner
            .set
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while !*set {
            set = self
                .inner
                .cond
                .wait(set)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}
