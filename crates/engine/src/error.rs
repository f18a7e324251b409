// SPDX-License-Identifier: MIT

//! Error types for the measurement engine.

use thiserror::Error;

/// A configurator `prepare` hook could not realize a configuration
/// (spec §4.1, §7) — fatal to the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("prepare(config={config_index}) failed: {reason}")]
    PrepareFailed { config_index: usize, reason: String },
    #[error("prepare(config={config_index}) timed out")]
    PrepareTimeout { config_index: usize },
}

/// Errors joining active and observed records for one job (spec §4.4).
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("merge window elapsed for job {0} before all configurations arrived")]
    Timeout(pathspider_core::JobId),
}

/// Top-level engine error: anything that propagates up and stops the
/// pipeline (spec §7: infrastructure errors, as opposed to probe/merge
/// errors that are encoded in the emitted record).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Observer(#[from] pathspider_observer::ObserverError),
    #[error(transparent)]
    Sink(#[from] pathspider_adapters::SinkError),
    #[error("job queue closed unexpectedly")]
    QueueClosed,
}
