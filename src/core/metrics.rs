//! Delivery counters
//!
//! `sent` and `failed` are monotonic until an explicit reset. They are
//! atomics so that a send that never got the state lock can still be counted
//! as failed; snapshots and resets are additionally serialized by the logger
//! through its state lock.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub sent: u32,
    pub failed: u32,
}

#[derive(Debug, Default)]
pub struct DeliveryMetrics {
    /// Records handed to the transport successfully
    sent: AtomicU32,

    /// Records lost to lock timeouts, format errors or send errors
    failed: AtomicU32,
}

impl DeliveryMetrics {
    pub const fn new() -> Self {
        Self {
            sent: AtomicU32::new(0),
            failed: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn sent(&self) -> u32 {
        self.sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u32 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_sent(&self) -> u32 {
        self.sent.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_failed(&self) -> u32 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Stats {
        Stats {
            sent: self.sent(),
            failed: self.failed(),
        }
    }

    pub fn reset(&self) {
        self.sent.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}
