// SPDX-License-Identifier: MIT

//! Joins a job's active records with whatever the observer saw for the
//! same traffic, and asks the active plugin to derive condition tags
//! from the result (spec §4.4).

use pathspider_core::{ActiveRecord, FlowRecord, FlowSlot, Job, Verdict};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

/// Key a flow record by the pieces an active record already knows about
/// itself, sidestepping the need to know which local address the
/// observer's capture interface bound (spec §9's open question on
/// canonicalization only concerns packet direction, not this lookup).
pub type MatchKey = (IpAddr, u16, u16);

pub fn match_key_for_job(job: &Job, source_port: u16) -> MatchKey {
    (job.ip, job.port, source_port)
}

pub fn match_key_for_flow(flow: &FlowRecord) -> Option<MatchKey> {
    let tuple = flow.five_tuple?;
    Some((tuple.remote_addr, tuple.remote_port, tuple.local_port))
}

/// Derives the condition tags a plugin attaches to a finished job
/// (spec §4.5's `combine` hook).
pub type Combiner = dyn Fn(&[FlowSlot]) -> Vec<String> + Send + Sync;

pub struct Merger {
    combine: Arc<Combiner>,
}

impl Merger {
    pub fn new(combine: Arc<Combiner>) -> Self {
        Self { combine }
    }

    /// Builds one job's verdict out of its active records and whatever
    /// flows the observer produced, matching each active record to the
    /// flow whose `(remote_addr, remote_port, local_port)` agrees with
    /// the connector's own view of the attempt.
    pub fn merge(
        &self,
        job: Job,
        actives: Vec<ActiveRecord>,
        flows_by_key: &mut HashMap<MatchKey, FlowRecord>,
        started_at_ms: u64,
        finished_at_ms: u64,
    ) -> Verdict {
        let slots: Vec<FlowSlot> = actives
            .into_iter()
            .map(|active| {
                let key = match_key_for_job(&job, active.source_port);
                match flows_by_key.remove(&key) {
                    Some(flow) => FlowSlot::merged(active, flow),
                    None => FlowSlot::unobserved(active),
                }
            })
            .collect();

        let conditions = (self.combine)(&slots);
        Verdict::new(job, slots, conditions, started_at_ms, finished_at_ms)
    }
}

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;
