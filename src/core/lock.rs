//! Mutual exclusion with a deadline
//!
//! Every shared structure in the client sits behind a [`BoundedMutex`]. No
//! caller ever waits longer than the configured timeout; an expired wait is an
//! ordinary [`LoggerError::LockTimeout`].

use super::error::{LoggerError, Result};
use parking_lot::{Mutex, MutexGuard};
use std::time::Duration;

/// Default bound on every lock wait
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(100);

/// A named mutex whose only acquisition path is bounded.
#[derive(Debug)]
pub struct BoundedMutex<T> {
    name: &'static str,
    inner: Mutex<T>,
}

impl<T> BoundedMutex<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            inner: Mutex::new(value),
        }
    }

    /// Acquire the lock or give up after `timeout`.
    pub fn acquire(&self, timeout: Duration) -> Result<MutexGuard<'_, T>> {
        self.inner
            .try_lock_for(timeout)
            .ok_or_else(|| LoggerError::lock_timeout(self.name, timeout))
    }

    /// Exclusive access without locking, for teardown paths that own `self`.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }
}
