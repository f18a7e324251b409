// SPDX-License-Identifier: MIT

//! The final, per-job output record a plugin's merge step produces.

use crate::flow_slot::FlowSlot;
use crate::job::Job;
use serde::{Deserialize, Serialize};

/// One line of the tool's result output: the original job, every flow
/// slot the engine collected for it, and the condition tags the plugin
/// derived from them (spec §4.4/§6 — `ecn.*`, `tfo.*`, `h2.*`,
/// `connectivity.*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub job: Job,
    pub flows: Vec<FlowSlot>,
    pub conditions: Vec<String>,
    pub started_at_ms: u64,
    pub finished_at_ms: u64,
}

impl Verdict {
    pub fn new(job: Job, flows: Vec<FlowSlot>, conditions: Vec<String>, started_at_ms: u64, finished_at_ms: u64) -> Self {
        Self {
            job,
            flows,
            conditions,
            started_at_ms,
            finished_at_ms,
        }
    }

    pub fn has_condition(&self, tag: &str) -> bool {
        self.conditions.iter().any(|c| c == tag)
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
