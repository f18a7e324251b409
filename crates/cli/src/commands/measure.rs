// SPDX-License-Identifier: MIT

//! `pathspider measure` - run a built-in plugin against a target list
//! (spec §6).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use pathspider_adapters::{NdjsonSink, PacketSource, PcapFileSource, ResultSink};
use pathspider_core::{IdGen, Job, JobRecord, UuidIdGen};
use pathspider_engine::OrchestratorConfig;
use pathspider_observer::Observer;
use pathspider_plugins::{plugin_by_name, ConnectKind};
use tokio::sync::mpsc;

#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Built-in plugin to run: ecn, tfo, or h2
    #[arg(long)]
    pub plugin: String,

    /// Number of parallel connector workers
    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// Newline-delimited target list
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write newline-delimited results (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Packet source URI (only `pcap:FILE` is implemented; `int:IFACE`
    /// live capture is not)
    #[arg(long)]
    pub interface: String,

    /// Connection mode for plugins with more than one dialing strategy
    /// (ecn, h2)
    #[arg(long, default_value = "tcp")]
    pub connect: String,
}

pub async fn handle(args: MeasureArgs) -> Result<()> {
    let connect = parse_connect_kind(&args.connect)?;
    let plugin = plugin_by_name(&args.plugin, connect, Duration::from_secs(args.timeout))
        .with_context(|| format!("unknown plugin: {}", args.plugin))?;

    let jobs = read_jobs(&args.input)?;
    let source = open_source(&args.interface)?;

    let (flow_tx, flow_rx) = mpsc::channel(256);
    let observer = Observer::new(
        source,
        plugin.analyzer_chains(),
        Default::default(),
        pathspider_observer::DEFAULT_IDLE_TIMEOUT_MS,
    );
    let observer_task = tokio::spawn(observer.run(flow_tx));

    let sink: Box<dyn ResultSink> = match &args.output {
        Some(path) => {
            let file = tokio::fs::File::create(path)
                .await
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(NdjsonSink::new(file))
        }
        None => Box::new(NdjsonSink::new(tokio::io::stdout())),
    };

    let config = OrchestratorConfig {
        configuration_count: plugin.configuration_count(),
        worker_count: args.workers,
        ..OrchestratorConfig::default()
    };

    plugin.run(jobs, flow_rx, sink, config).await?;

    observer_task
        .await
        .map_err(|err| anyhow::anyhow!("observer task panicked: {err}"))??;

    Ok(())
}

fn parse_connect_kind(raw: &str) -> Result<ConnectKind> {
    match raw {
        "tcp" => Ok(ConnectKind::Tcp),
        "http" => Ok(ConnectKind::Http),
        "https" => Ok(ConnectKind::Https),
        other => bail!("unknown --connect mode: {other} (expected tcp, http, or https)"),
    }
}

fn read_jobs(path: &PathBuf) -> Result<Vec<Job>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let id_gen = UuidIdGen;
    let mut jobs = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: JobRecord = serde_json::from_str(&line)
            .with_context(|| format!("malformed target record: {line}"))?;
        jobs.push(Job::from_record(id_gen.next().into(), record));
    }

    Ok(jobs)
}

fn open_source(uri: &str) -> Result<Box<dyn PacketSource>> {
    if let Some(path) = uri.strip_prefix("pcap:") {
        return Ok(Box::new(PcapFileSource::open(path)?));
    }
    if uri.starts_with("int:") {
        bail!("live interface capture ({uri}) is not supported by this build; use pcap:FILE");
    }
    bail!("unrecognized packet source URI: {uri}");
}

#[cfg(test)]
#[path = "measure_tests.rs"]
mod tests;
