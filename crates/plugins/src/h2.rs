// SPDX-License-Identifier: MIT

//! HTTP/2 upgrade plugin, grounded in
//! `examples/original_source/pathspider/plugins/h2.py`.

use crate::helpers::combine_connectivity;
use crate::plugin::{ConnectKind, Plugin};
use async_trait::async_trait;
use pathspider_adapters::{ConnectorAdapter, HttpConnector, HttpVersion, ResultSink, Scheme};
use pathspider_core::{ActiveRecord, ConnState, FlowRecord, FlowSlot, Job, SystemClock};
use pathspider_engine::{ConfigMode, Configurator, EngineError, Merger, NoopPrepare, OrchestratorConfig};
use pathspider_observer::{Analyzer, TcpChain};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Configuration 0 is a plain request; configuration 1 forces HTTP/2 with
/// prior knowledge. Both share one scheme, fixed by `--connect`.
#[derive(Clone)]
struct H2Connector {
    no_h2: HttpConnector,
    h2: HttpConnector,
}

#[async_trait]
impl ConnectorAdapter for H2Connector {
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord {
        match config_index {
            0 => self.no_h2.connect(job, config_index, started_at_ms).await,
            _ => self.h2.connect(job, config_index, started_at_ms).await,
        }
    }
}

pub struct H2Plugin {
    connect: ConnectKind,
    timeout: Duration,
}

impl H2Plugin {
    pub fn new(connect: ConnectKind, timeout: Duration) -> Self {
        Self { connect, timeout }
    }

    fn connector(&self) -> H2Connector {
        let scheme = match self.connect {
            ConnectKind::Https => Scheme::Https,
            ConnectKind::Http | ConnectKind::Tcp => Scheme::Http,
        };
        H2Connector {
            no_h2: HttpConnector::new(self.timeout).with_scheme(scheme).with_version(HttpVersion::Http1),
            h2: HttpConnector::new(self.timeout).with_scheme(scheme).with_version(HttpVersion::H2PriorKnowledge),
        }
    }
}

/// Reproduces `H2.combine_flows` exactly: a connectivity tag from both
/// configurations' connect outcomes, then (only if configuration 1
/// connected) an upgrade tag keyed off whether the response actually came
/// back over HTTP/2.
fn combine_flows(flows: &[FlowSlot]) -> Vec<String> {
    let ok0 = flows.first().is_some_and(|f| f.active.state == ConnState::Ok);
    let ok1 = flows.get(1).is_some_and(|f| f.active.state == ConnState::Ok);

    let mut conditions = vec![combine_connectivity(ok0, ok1).to_string()];

    if let Some(slot1) = flows.get(1) {
        if slot1.active.state == ConnState::Ok {
            let upgraded = slot1
                .active
                .fields
                .get("h2_version")
                .and_then(|v| v.as_str())
                .is_some_and(|v| v.contains("HTTP/2") || v.contains("H2"));
            conditions.push(if upgraded { "h2.upgrade.success" } else { "h2.upgrade.failed" }.to_string());
        }
    }

    conditions
}

#[async_trait]
impl Plugin for H2Plugin {
    fn name(&self) -> &'static str {
        "h2"
    }

    fn description(&self) -> &'static str {
        "HTTP/2"
    }

    fn configuration_count(&self) -> usize {
        2
    }

    fn analyzer_chains(&self) -> Vec<Box<dyn Analyzer>> {
        vec![Box::new(TcpChain)]
    }

    async fn run(
        &self,
        jobs: Vec<Job>,
        flows: mpsc::Receiver<FlowRecord>,
        sink: Box<dyn ResultSink>,
        config: OrchestratorConfig,
    ) -> Result<(), EngineError> {
        let connector = self.connector();
        let configurator = Configurator::new(ConfigMode::Desynchronized, Arc::new(NoopPrepare));
        let merger = Merger::new(Arc::new(combine_flows));

        pathspider_engine::run(jobs, connector, configurator, merger, flows, sink, config, SystemClock).await
    }
}

#[cfg(test)]
#[path = "h2_tests.rs"]
mod tests;
