// SPDX-License-Identifier: MIT

//! Clock abstraction so timeouts and timestamps are deterministic in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of time for components that need wall-clock timestamps and
/// monotonic instants (probe timeouts, flow idle timers, merge windows).
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn epoch_ms(&self) -> u64;
}

/// Real clock backed by the OS.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Fake clock for deterministic tests: `now()` is fixed at construction,
/// `epoch_ms()` is a counter that can be advanced explicitly.
#[derive(Debug, Clone)]
pub struct FakeClock {
    start: Instant,
    epoch_ms: Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new(epoch_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            epoch_ms: Arc::new(AtomicU64::new(epoch_ms)),
        }
    }

    pub fn advance_ms(&self, delta: u64) {
        self.epoch_ms.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start
    }

    fn epoch_ms(&self) -> u64 {
        self.epoch_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
