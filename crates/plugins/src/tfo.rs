// SPDX-License-Identifier: MIT

//! TCP Fast Open plugin, grounded in
//! `examples/original_source/pathspider/plugins/tfo.py`.

use crate::helpers::combine_connectivity;
use crate::plugin::Plugin;
use async_trait::async_trait;
use pathspider_adapters::{ConnectorAdapter, ResultSink, TfoConnector};
use pathspider_core::id::JobId;
use pathspider_core::{ActiveRecord, ConnState, FlowRecord, FlowSlot, Job, SystemClock};
use pathspider_engine::{ConfigMode, Configurator, EngineError, Merger, NoopPrepare, OrchestratorConfig};
use pathspider_observer::{Analyzer, TcpChain, TfoChain};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Wraps [`TfoConnector`], propagating "baseline failed" across the two
/// desynchronized configuration rounds of the same job: configuration 1
/// is charged `SKIPPED` rather than attempting the cookie exchange,
/// mirroring the original's `job['_tfo_baseline_failed']` scratch flag.
#[derive(Clone)]
struct SkipPropagatingConnector {
    inner: TfoConnector,
    baseline_failed: Arc<Mutex<HashSet<JobId>>>,
}

impl SkipPropagatingConnector {
    fn new(inner: TfoConnector) -> Self {
        Self {
            inner,
            baseline_failed: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl ConnectorAdapter for SkipPropagatingConnector {
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord {
        if config_index == 1 && self.baseline_failed.lock().remove(&job.id) {
            return ActiveRecord::new(job.id.clone(), config_index, started_at_ms);
        }

        let record = self.inner.connect(job, config_index, started_at_ms).await;

        if config_index == 0 && record.state != ConnState::Ok {
            self.baseline_failed.lock().insert(job.id.clone());
        }

        record
    }
}

pub struct TfoPlugin {
    timeout: Duration,
}

impl TfoPlugin {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Reproduces the shared `combine_connectivity` tag plus a Fast Open
/// negotiation tag keyed off whether configuration 1's flow carried a
/// recognized cookie kind on its SYN-ACK (`TfoFields::negotiated`).
fn combine_flows(flows: &[FlowSlot]) -> Vec<String> {
    let ok0 = flows.first().is_some_and(|f| f.active.state == ConnState::Ok);
    let ok1 = flows.get(1).is_some_and(|f| f.active.state == ConnState::Ok);

    let mut conditions = vec![combine_connectivity(ok0, ok1).to_string()];

    if let Some(slot1) = flows.get(1) {
        if slot1.observed {
            if let Some(flow) = &slot1.flow {
                conditions.push(
                    if flow.tfo.negotiated() {
                        "tfo.negotiation.succeeded"
                    } else {
                        "tfo.negotiation.failed"
                    }
                    .to_string(),
                );
            }
        }
    }

    conditions
}

#[async_trait]
impl Plugin for TfoPlugin {
    fn name(&self) -> &'static str {
        "tfo"
    }

    fn description(&self) -> &'static str {
        "TCP Fast Open"
    }

    fn configuration_count(&self) -> usize {
        2
    }

    fn analyzer_chains(&self) -> Vec<Box<dyn Analyzer>> {
        vec![Box::new(TcpChain), Box::new(TfoChain)]
    }

    async fn run(
        &self,
        jobs: Vec<Job>,
        flows: mpsc::Receiver<FlowRecord>,
        sink: Box<dyn ResultSink>,
        config: OrchestratorConfig,
    ) -> Result<(), EngineError> {
        let connector = SkipPropagatingConnector::new(TfoConnector::new(self.timeout));
        let configurator = Configurator::new(ConfigMode::Desynchronized, Arc::new(NoopPrepare));
        let merger = Merger::new(Arc::new(combine_flows));

        pathspider_engine::run(jobs, connector, configurator, merger, flows, sink, config, SystemClock).await
    }
}

#[cfg(test)]
#[path = "tfo_tests.rs"]
mod tests;
