// SPDX-License-Identifier: MIT

//! Result sinks: where finished verdicts go (spec §6, ndjson on stdout or
//! a file by default).

mod ndjson;

pub use ndjson::NdjsonSink;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSink;

use async_trait::async_trait;
use pathspider_core::Verdict;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write result: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where a finished [`Verdict`] is written.
#[async_trait]
pub trait ResultSink: Send {
    async fn write(&mut self, verdict: &Verdict) -> Result<(), SinkError>;

    /// Flush any buffered output; called once after the run completes.
    async fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[async_trait]
impl ResultSink for Box<dyn ResultSink> {
    async fn write(&mut self, verdict: &Verdict) -> Result<(), SinkError> {
        (**self).write(verdict).await
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush().await
    }
}
