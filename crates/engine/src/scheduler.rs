// SPDX-License-Identifier: MIT

//! Timer management for per-job merge deadlines (spec §4.4).

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Timer {
    fires_at: Instant,
}

/// Tracks one merge-timeout deadline per in-flight job.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<String, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_timer(&mut self, id: String, duration: Duration, now: Instant) {
        let fires_at = now + duration;
        self.timers.insert(id, Timer { fires_at });
    }

    pub fn cancel_timer(&mut self, id: &str) {
        self.timers.remove(id);
    }

    /// Returns the ids of every timer that has fired, removing them.
    pub fn fired(&mut self, now: Instant) -> Vec<String> {
        let fired: Vec<String> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.fires_at <= now)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &fired {
            self.timers.remove(id);
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.fires_at).min()
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
