// SPDX-License-Identifier: MIT

//! Connector adapters: the side of the tool that actually dials targets.

mod http;
mod tcp;
mod tfo;

pub use http::{HttpConnector, HttpVersion, Scheme};
pub use tcp::TcpConnector;
pub use tfo::TfoConnector;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ConnectorCall, FakeConnector};

use async_trait::async_trait;
use pathspider_core::{ActiveRecord, Job};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("connect to {0} failed: {1}")]
    Connect(String, std::io::Error),
    #[error("connect to {0} timed out")]
    Timeout(String),
    #[error("socket option failed: {0}")]
    SockOpt(std::io::Error),
}

/// One configured way of dialing a target (spec §4.2: a plugin publishes
/// one or more of these, e.g. "off" / "on" for ECN's sysctl toggle).
#[async_trait]
pub trait ConnectorAdapter: Clone + Send + Sync + 'static {
    /// Attempt one connection to `job` using configuration `config_index`,
    /// recording the outcome into a fresh [`ActiveRecord`].
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord;
}
