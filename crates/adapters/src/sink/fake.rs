// SPDX-License-Identifier: MIT

//! Fake result sink for testing the engine without real I/O.

use super::{ResultSink, SinkError};
use async_trait::async_trait;
use parking_lot::Mutex;
use pathspider_core::Verdict;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct FakeSink {
    written: Arc<Mutex<Vec<Verdict>>>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> Vec<Verdict> {
        self.written.lock().clone()
    }
}

#[async_trait]
impl ResultSink for FakeSink {
    async fn write(&mut self, verdict: &Verdict) -> Result<(), SinkError> {
        self.written.lock().push(verdict.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
