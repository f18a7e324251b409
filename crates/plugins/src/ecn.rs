// SPDX-License-Identifier: MIT

//! Explicit Congestion Notification plugin, grounded in
//! `examples/original_source/pathspider/plugins/ecn.py`.

use crate::plugin::{ConnectKind, Plugin};
use async_trait::async_trait;
use pathspider_adapters::{ConnectorAdapter, HttpConnector, HttpVersion, ResultSink, Scheme, TcpConnector};
use pathspider_core::tcp::{TCP_SAE, TCP_SAEC};
use pathspider_core::{ActiveRecord, ConnState, FlowRecord, FlowSlot, Job, SystemClock};
use pathspider_engine::{ConfigError, ConfigMode, Configurator, EngineError, Merger, OrchestratorConfig, PrepareHook};
use pathspider_observer::{Analyzer, EcnChain, TcpChain};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::mpsc;

#[derive(Clone)]
enum EcnConnector {
    Tcp(TcpConnector),
    Http(HttpConnector),
}

#[async_trait]
impl ConnectorAdapter for EcnConnector {
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord {
        match self {
            EcnConnector::Tcp(c) => c.connect(job, config_index, started_at_ms).await,
            EcnConnector::Http(c) => c.connect(job, config_index, started_at_ms).await,
        }
    }
}

struct EcnSysctlHook;

#[async_trait]
impl PrepareHook for EcnSysctlHook {
    async fn prepare(&self, config_index: usize) -> Result<(), ConfigError> {
        let value = match config_index {
            0 => "2",
            1 => "1",
            other => {
                return Err(ConfigError::PrepareFailed {
                    config_index: other,
                    reason: "ecn plugin only defines configurations 0 and 1".to_string(),
                })
            }
        };

        let mut cmd = Command::new("sysctl");
        cmd.args(["-w", &format!("net.ipv4.tcp_ecn={value}")]);

        match pathspider_adapters::subprocess::run_with_timeout(cmd, pathspider_adapters::subprocess::SYSCTL_TIMEOUT, "ecn sysctl toggle").await {
            Ok(output) if output.status.success() => {
                tracing::debug!(config_index, value, "ecn sysctl toggle applied");
                Ok(())
            }
            Ok(output) => Err(ConfigError::PrepareFailed {
                config_index,
                reason: format!("sysctl exited with {:?}", output.status.code()),
            }),
            Err(reason) => Err(ConfigError::PrepareFailed { config_index, reason }),
        }
    }
}

pub struct EcnPlugin {
    connect: ConnectKind,
    timeout: Duration,
}

impl EcnPlugin {
    pub fn new(connect: ConnectKind, timeout: Duration) -> Self {
        Self { connect, timeout }
    }

    fn connector(&self) -> EcnConnector {
        match self.connect {
            ConnectKind::Tcp => EcnConnector::Tcp(TcpConnector { connect_timeout: self.timeout }),
            ConnectKind::Http | ConnectKind::Https => {
                EcnConnector::Http(HttpConnector::new(self.timeout).with_scheme(Scheme::Http).with_version(HttpVersion::Http1))
            }
        }
    }
}

/// Reproduces `ECN.combine_flows` exactly: a connectivity tag from both
/// configurations' connect outcomes, then (only if configuration 1 was
/// observed and connected) a negotiation tag keyed off
/// `tcp_synflags_rev & SAEC`, plus three ECT0/ECT1/CE "ipmark" tags.
fn combine_flows(flows: &[FlowSlot]) -> Vec<String> {
    let mut conditions = Vec::new();

    let ok0 = flows.first().is_some_and(|f| f.active.state == ConnState::Ok);
    let ok1 = flows.get(1).is_some_and(|f| f.active.state == ConnState::Ok);

    conditions.push(
        match (ok0, ok1) {
            (true, true) => "ecn.connectivity.works",
            (true, false) => "ecn.connectivity.broken",
            (false, true) => "ecn.connectivity.transient",
            (false, false) => "ecn.connectivity.offline",
        }
        .to_string(),
    );

    if let Some(slot1) = flows.get(1) {
        if slot1.observed {
            if let Some(flow) = &slot1.flow {
                if flow.tcp.tcp_connected {
                    let masked = flow.tcp.tcp_synflags_rev & TCP_SAEC;
                    if masked == TCP_SAE {
                        conditions.push("ecn.negotiation.succeeded".to_string());
                    } else if masked == TCP_SAEC {
                        conditions.push("ecn.negotiation.reflected".to_string());
                    } else {
                        conditions.push("ecn.negotiation.failed".to_string());
                    }

                    conditions.push(tag("ecn.ipmark.ect0", flow.ecn.ecn_ect0_syn_rev || flow.ecn.ecn_ect0_data_rev));
                    conditions.push(tag("ecn.ipmark.ect1", flow.ecn.ecn_ect1_syn_rev || flow.ecn.ecn_ect1_data_rev));
                    conditions.push(tag("ecn.ipmark.ce", flow.ecn.ecn_ce_syn_rev || flow.ecn.ecn_ce_data_rev));
                }
            }
        }
    }

    conditions
}

fn tag(prefix: &str, seen: bool) -> String {
    format!("{prefix}.{}", if seen { "seen" } else { "not_seen" })
}

#[async_trait]
impl Plugin for EcnPlugin {
    fn name(&self) -> &'static str {
        "ecn"
    }

    fn description(&self) -> &'static str {
        "Explicit Congestion Notification"
    }

    fn configuration_count(&self) -> usize {
        2
    }

    fn analyzer_chains(&self) -> Vec<Box<dyn Analyzer>> {
        vec![Box::new(TcpChain), Box::new(EcnChain)]
    }

    async fn run(
        &self,
        jobs: Vec<Job>,
        flows: mpsc::Receiver<FlowRecord>,
        sink: Box<dyn ResultSink>,
        config: OrchestratorConfig,
    ) -> Result<(), EngineError> {
        let connector = self.connector();
        let configurator = Configurator::new(ConfigMode::Synchronized, Arc::new(EcnSysctlHook));
        let merger = Merger::new(Arc::new(combine_flows));

        pathspider_engine::run(jobs, connector, configurator, merger, flows, sink, config, SystemClock).await
    }
}

#[cfg(test)]
#[path = "ecn_tests.rs"]
mod tests;
