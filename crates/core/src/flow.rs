// SPDX-License-Identifier: MIT

//! The merged, per-direction record an analyzer chain produces for one flow.

use crate::ecn::EcnFields;
use crate::five_tuple::FiveTuple;
use crate::tcp::TcpFields;
use crate::tfo::TfoFields;
use serde::{Deserialize, Serialize};

/// Everything the observer learned about one canonical 5-tuple.
///
/// Protocol-specific fields are flattened into the same JSON object a
/// plugin's condition tags are computed from, matching the flat per-flow
/// dict the original tool produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowRecord {
    pub five_tuple: Option<FiveTuple>,
    #[serde(flatten)]
    pub tcp: TcpFields,
    #[serde(flatten)]
    pub ecn: EcnFields,
    #[serde(flatten)]
    pub tfo: TfoFields,
    #[serde(default)]
    pub first_seen_ms: u64,
    #[serde(default)]
    pub last_seen_ms: u64,
    #[serde(default)]
    pub packets_fwd: u64,
    #[serde(default)]
    pub packets_rev: u64,
    #[serde(default)]
    pub bytes_fwd: u64,
    #[serde(default)]
    pub bytes_rev: u64,
}

impl FlowRecord {
    pub fn new(five_tuple: FiveTuple, seen_ms: u64) -> Self {
        Self {
            five_tuple: Some(five_tuple),
            first_seen_ms: seen_ms,
            last_seen_ms: seen_ms,
            ..Default::default()
        }
    }

    /// True once the chain has observed enough to close the flow out
    /// (mirrors [`TcpFields::is_complete`], the only completion signal the
    /// analyzer chains currently produce).
    pub fn is_complete(&self) -> bool {
        self.tcp.is_complete()
    }
}

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;
