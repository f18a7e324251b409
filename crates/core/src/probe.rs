// SPDX-License-Identifier: MIT

//! Connector-side records: what a worker attempted and how it ended.

use crate::job::Job;
use serde::{Deserialize, Serialize};

/// Outcome of one connector attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnState {
    Ok,
    Failed,
    Timeout,
    /// The job was never attempted (e.g. desynchronized config index out
    /// of range, or the job was malformed).
    Skipped,
}

/// What a connector worker did for one (job, configuration) pair.
///
/// `fields` carries connector-specific scratch data a plugin's connect
/// step wants to hand to its own analysis step (e.g. the local port it
/// bound, so the observer can match the right flow). It is intentionally
/// untyped: the plugin that writes it is the plugin that reads it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRecord {
    pub job_id: crate::id::JobId,
    /// Index into the plugin's `configurations()` list this attempt used.
    pub config_index: usize,
    pub state: ConnState,
    #[serde(default)]
    pub source_port: u16,
    pub started_at_ms: u64,
    #[serde(default)]
    pub elapsed_ms: u64,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ActiveRecord {
    pub fn new(job_id: crate::id::JobId, config_index: usize, started_at_ms: u64) -> Self {
        Self {
            job_id,
            config_index,
            state: ConnState::Skipped,
            source_port: 0,
            started_at_ms,
            elapsed_ms: 0,
            fields: serde_json::Map::new(),
        }
    }
}

/// Work handed to a connector worker: a job plus which configuration of
/// the active plugin to run it with.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub job: Job,
    pub config_index: usize,
}

impl ProbeRequest {
    pub fn new(job: Job, config_index: usize) -> Self {
        Self { job, config_index }
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
