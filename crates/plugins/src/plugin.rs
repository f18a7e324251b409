// SPDX-License-Identifier: MIT

//! The plugin contract: a measurement technique bundles its own
//! connectors, analyzer chains, and condition-tag logic (spec §4.5).

use async_trait::async_trait;
use pathspider_adapters::ResultSink;
use pathspider_core::{FlowRecord, Job};
use pathspider_engine::{EngineError, OrchestratorConfig};
use pathspider_observer::Analyzer;
use tokio::sync::mpsc;

/// Which built-in connector a plugin's `--connect` flag selects (spec
/// §6's per-plugin CLI flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectKind {
    Tcp,
    Http,
    Https,
}

/// A measurement technique: its analyzer chains plus a `run` entry point
/// that wires a connector, configurator, and merger together and drives
/// one full measurement over `jobs` (spec §4.5). Connector type and
/// clock are erased behind this method so heterogeneous plugins can
/// share one `Box<dyn Plugin>` registry (spec's `[EXPANDED]` compile-time
/// registry design).
#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Number of configurations this plugin probes per job.
    fn configuration_count(&self) -> usize;

    /// Analyzer chains the observer must install before this plugin's
    /// flows can be interpreted, in the order they must run.
    fn analyzer_chains(&self) -> Vec<Box<dyn Analyzer>>;

    /// Runs one measurement: dispatches `jobs` across this plugin's
    /// configurations, joins active records with whatever arrives on
    /// `flows`, and writes one verdict per job to `sink`.
    async fn run(
        &self,
        jobs: Vec<Job>,
        flows: mpsc::Receiver<FlowRecord>,
        sink: Box<dyn ResultSink>,
        config: OrchestratorConfig,
    ) -> Result<(), EngineError>;
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
