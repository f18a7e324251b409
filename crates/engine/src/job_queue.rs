// SPDX-License-Identifier: MIT

//! Pairing table: buffers active records per job until all `K`
//! configurations have reported, or the merge timeout elapses (spec §3
//! invariant 4, §4.4, §5).

use pathspider_core::{ActiveRecord, Job, JobId};
use std::collections::HashMap;

struct PendingJob {
    job: Job,
    started_at_ms: u64,
    last_activity_ms: u64,
    records: Vec<Option<ActiveRecord>>,
}

pub struct PairingTable {
    k: usize,
    pending: HashMap<JobId, PendingJob>,
}

impl PairingTable {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            pending: HashMap::new(),
        }
    }

    /// Register a job as about to be probed at every configuration.
    pub fn begin(&mut self, job: Job, started_at_ms: u64) {
        self.pending.insert(
            job.id.clone(),
            PendingJob {
                job,
                started_at_ms,
                last_activity_ms: started_at_ms,
                records: vec![None; self.k],
            },
        );
    }

    /// Record one configuration's outcome. Returns the job, its full
    /// record set, and its registered start time once all `K` have arrived.
    pub fn record(&mut self, record: ActiveRecord, now_ms: u64) -> Option<(Job, Vec<ActiveRecord>, u64)> {
        let job_id = record.job_id.clone();
        let config_index = record.config_index;

        let pending = self.pending.get_mut(&job_id)?;
        if config_index >= pending.records.len() {
            return None;
        }
        pending.records[config_index] = Some(record);
        pending.last_activity_ms = now_ms;

        if pending.records.iter().all(Option::is_some) {
            let pending = self.pending.remove(&job_id)?;
            let records = pending.records.into_iter().map(|r| r.unwrap()).collect();
            Some((pending.job, records, pending.started_at_ms))
        } else {
            None
        }
    }

    /// Sweep jobs whose last activity is older than `merge_timeout_ms`,
    /// returning them with `None` slots left as-is for the caller to fold
    /// into `observed=false` output (spec §4.4 failure semantics).
    pub fn sweep_timed_out(&mut self, now_ms: u64, merge_timeout_ms: u64) -> Vec<(Job, Vec<Option<ActiveRecord>>, u64)> {
        let stale: Vec<JobId> = self
            .pending
            .iter()
            .filter(|(_, pending)| now_ms.saturating_sub(pending.last_activity_ms) >= merge_timeout_ms)
            .map(|(id, _)| id.clone())
            .collect();

        stale
            .into_iter()
            .filter_map(|id| self.pending.remove(&id))
            .map(|pending| (pending.job, pending.records, pending.started_at_ms))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
#[path = "job_queue_tests.rs"]
mod tests;
