// SPDX-License-Identifier: MIT

//! Compile-time plugin registry, replacing the original's runtime
//! `straight.plugin.load` discovery with a known, closed set of
//! built-ins (spec §4.5).

use crate::ecn::EcnPlugin;
use crate::h2::H2Plugin;
use crate::plugin::{ConnectKind, Plugin};
use crate::tfo::TfoPlugin;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    Ecn,
    Tfo,
    H2,
}

impl PluginKind {
    pub fn name(self) -> &'static str {
        match self {
            PluginKind::Ecn => "ecn",
            PluginKind::Tfo => "tfo",
            PluginKind::H2 => "h2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ecn" => Some(PluginKind::Ecn),
            "tfo" => Some(PluginKind::Tfo),
            "h2" => Some(PluginKind::H2),
            _ => None,
        }
    }

    pub fn all() -> [PluginKind; 3] {
        [PluginKind::Ecn, PluginKind::Tfo, PluginKind::H2]
    }
}

/// Build the named built-in plugin, wired with the connector kind and
/// per-probe timeout the CLI was invoked with.
pub fn plugin_by_name(name: &str, connect: ConnectKind, timeout: Duration) -> Option<Box<dyn Plugin>> {
    match PluginKind::from_name(name)? {
        PluginKind::Ecn => Some(Box::new(EcnPlugin::new(connect, timeout))),
        PluginKind::Tfo => Some(Box::new(TfoPlugin::new(timeout))),
        PluginKind::H2 => Some(Box::new(H2Plugin::new(connect, timeout))),
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
