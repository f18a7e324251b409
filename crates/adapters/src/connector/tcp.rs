// SPDX-License-Identifier: MIT

//! Plain TCP connect/disconnect connector (spec §4.2, the baseline dialer
//! every plugin's "control" configuration reduces to).

use super::ConnectorAdapter;
use async_trait::async_trait;
use pathspider_core::{ActiveRecord, ConnState, Job};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct TcpConnector {
    pub connect_timeout: Duration,
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl TcpConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl ConnectorAdapter for TcpConnector {
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord {
        let mut record = ActiveRecord::new(job.id.clone(), config_index, started_at_ms);
        let addr = SocketAddr::new(job.ip, job.port);
        let attempt_start = Instant::now();

        match tokio::time::timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                record.state = ConnState::Ok;
                if let Ok(local) = stream.local_addr() {
                    record.source_port = local.port();
                }
            }
            Ok(Err(err)) => {
                tracing::debug!(job_id = job.id.as_str(), %addr, %err, "tcp connect failed");
                record.state = ConnState::Failed;
            }
            Err(_) => {
                tracing::debug!(job_id = job.id.as_str(), %addr, "tcp connect timed out");
                record.state = ConnState::Timeout;
            }
        }

        record.elapsed_ms = attempt_start.elapsed().as_millis() as u64;
        record
    }
}

#[cfg(test)]
#[path = "tcp_tests.rs"]
mod tests;
