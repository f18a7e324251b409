// SPDX-License-Identifier: MIT

//! The observer's live flow state (spec §3 invariant 1: a flow is either
//! active here or already emitted, never both).

use pathspider_core::{FiveTuple, FlowRecord};
use std::collections::HashMap;

pub struct FlowTable {
    flows: HashMap<FiveTuple, FlowRecord>,
    idle_timeout_ms: u64,
}

impl FlowTable {
    pub fn new(idle_timeout_ms: u64) -> Self {
        Self {
            flows: HashMap::new(),
            idle_timeout_ms,
        }
    }

    pub fn get_mut(&mut self, key: &FiveTuple) -> Option<&mut FlowRecord> {
        self.flows.get_mut(key)
    }

    pub fn contains(&self, key: &FiveTuple) -> bool {
        self.flows.contains_key(key)
    }

    pub fn insert(&mut self, key: FiveTuple, record: FlowRecord) {
        self.flows.insert(key, record);
    }

    pub fn remove(&mut self, key: &FiveTuple) -> Option<FlowRecord> {
        self.flows.remove(key)
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Remove and return every flow whose `last_seen_ms` is more than
    /// `idle_timeout_ms` behind `now_ms` (spec §5: per-flow idle timeout).
    pub fn evict_idle(&mut self, now_ms: u64) -> Vec<FlowRecord> {
        let stale: Vec<FiveTuple> = self
            .flows
            .iter()
            .filter(|(_, flow)| now_ms.saturating_sub(flow.last_seen_ms) >= self.idle_timeout_ms)
            .map(|(key, _)| *key)
            .collect();

        stale
            .into_iter()
            .filter_map(|key| self.flows.remove(&key))
            .collect()
    }

    /// Drain every remaining flow, regardless of idle time (spec §5:
    /// shutdown drains the observer's table).
    pub fn drain_all(&mut self) -> Vec<FlowRecord> {
        self.flows.drain().map(|(_, flow)| flow).collect()
    }
}

#[cfg(test)]
#[path = "flow_table_tests.rs"]
mod tests;
