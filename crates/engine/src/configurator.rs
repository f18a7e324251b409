// SPDX-License-Identifier: MIT

//! Configuration-switching contract (spec §4.1): a plugin probes its
//! target once per entry in its configuration list, and may need the
//! vantage point's own stack reconfigured between rounds (e.g. toggling
//! a sysctl) before the next round's connects are meaningful.

use crate::error::ConfigError;
use async_trait::async_trait;
use std::sync::Arc;

/// Whether rounds must be strictly ordered and host-wide reconfigured
/// between them, or may run with all configurations interleaved freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    /// `prepare(c)` is called and awaited before any worker is allowed to
    /// start configuration `c`'s round; workers for `c` must all finish
    /// before `prepare(c + 1)` runs.
    Synchronized,
    /// Every configuration's workers may run concurrently; `prepare` is
    /// never invoked.
    Desynchronized,
}

/// A plugin's hook for realizing one of its configurations on the host
/// (e.g. `pathspider_adapters::subprocess::run_with_timeout` toggling
/// `net.ipv4.tcp_ecn`). Desynchronized plugins still implement this —
/// it is simply never called.
#[async_trait]
pub trait PrepareHook: Send + Sync {
    async fn prepare(&self, config_index: usize) -> Result<(), ConfigError>;
}

/// A hook that does nothing; the natural choice for a desynchronized
/// plugin, and a stand-in in tests.
pub struct NoopPrepare;

#[async_trait]
impl PrepareHook for NoopPrepare {
    async fn prepare(&self, _config_index: usize) -> Result<(), ConfigError> {
        Ok(())
    }
}

pub struct Configurator {
    mode: ConfigMode,
    hook: Arc<dyn PrepareHook>,
}

impl Configurator {
    pub fn new(mode: ConfigMode, hook: Arc<dyn PrepareHook>) -> Self {
        Self { mode, hook }
    }

    pub fn mode(&self) -> ConfigMode {
        self.mode
    }

    /// Realizes configuration `config_index`, blocking the caller until
    /// it is safe to start that round's connects. A no-op in
    /// desynchronized mode regardless of what hook was supplied.
    pub async fn prepare(&self, config_index: usize) -> Result<(), ConfigError> {
        match self.mode {
            ConfigMode::Desynchronized => Ok(()),
            ConfigMode::Synchronized => self.hook.prepare(config_index).await,
        }
    }
}

#[cfg(test)]
#[path = "configurator_tests.rs"]
mod tests;
