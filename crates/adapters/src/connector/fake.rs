// SPDX-License-Identifier: MIT

//! Fake connector for testing engine/plugin wiring without real sockets.

use super::ConnectorAdapter;
use async_trait::async_trait;
use parking_lot::Mutex;
use pathspider_core::{ActiveRecord, ConnState, Job};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ConnectorCall {
    pub job_id: pathspider_core::JobId,
    pub config_index: usize,
}

struct FakeConnectorState {
    calls: Vec<ConnectorCall>,
    /// State to report for each call, consumed in order; defaults to `Ok`
    /// once exhausted.
    scripted_states: Vec<ConnState>,
}

#[derive(Clone)]
pub struct FakeConnector {
    inner: Arc<Mutex<FakeConnectorState>>,
}

impl Default for FakeConnector {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeConnectorState {
                calls: Vec::new(),
                scripted_states: Vec::new(),
            })),
        }
    }
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue outcomes to return, in order, for successive `connect` calls.
    pub fn with_scripted_states(states: Vec<ConnState>) -> Self {
        let fake = Self::default();
        fake.inner.lock().scripted_states = states;
        fake
    }

    pub fn calls(&self) -> Vec<ConnectorCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl ConnectorAdapter for FakeConnector {
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord {
        let mut guard = self.inner.lock();
        guard.calls.push(ConnectorCall {
            job_id: job.id.clone(),
            config_index,
        });

        let state = if guard.scripted_states.is_empty() {
            ConnState::Ok
        } else {
            guard.scripted_states.remove(0)
        };

        let mut record = ActiveRecord::new(job.id.clone(), config_index, started_at_ms);
        record.state = state;
        record
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
