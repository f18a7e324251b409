// SPDX-License-Identifier: MIT

//! Fixed-size pool of connector workers pulling probe requests off a
//! shared queue (spec §4.2, §5).

use pathspider_adapters::ConnectorAdapter;
use pathspider_core::{ActiveRecord, Clock, ProbeRequest};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinSet;

pub struct WorkerPool<C: ConnectorAdapter> {
    connector: C,
    worker_count: usize,
}

impl<C: ConnectorAdapter> WorkerPool<C> {
    pub fn new(connector: C, worker_count: usize) -> Self {
        Self {
            connector,
            worker_count: worker_count.max(1),
        }
    }

    /// Drains `jobs` until the sender side closes, dispatching each
    /// request to whichever of the pool's workers is free, and forwards
    /// every outcome to `out`. Returns once every worker has drained the
    /// queue and exited.
    pub async fn run<Clk: Clock>(self, jobs: mpsc::Receiver<ProbeRequest>, out: mpsc::Sender<ActiveRecord>, clock: Clk) {
        tracing::debug!(worker_count = self.worker_count, "starting worker pool");
        let jobs = Arc::new(AsyncMutex::new(jobs));
        let mut workers = JoinSet::new();

        for _ in 0..self.worker_count {
            let connector = self.connector.clone();
            let jobs = Arc::clone(&jobs);
            let out = out.clone();
            let clock = clock.clone();

            workers.spawn(async move {
                loop {
                    let request = { jobs.lock().await.recv().await };
                    let Some(request) = request else { break };

                    let started_at_ms = clock.epoch_ms();
                    let record = connector.connect(&request.job, request.config_index, started_at_ms).await;
                    if out.send(record).await.is_err() {
                        tracing::debug!("active record channel closed, worker exiting");
                        break;
                    }
                }
            });
        }

        while workers.join_next().await.is_some() {}
    }
}

#[cfg(test)]
#[path = "worker_pool_tests.rs"]
mod tests;
