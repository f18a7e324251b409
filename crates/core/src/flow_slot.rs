// SPDX-License-Identifier: MIT

//! Pairing of one connector attempt with the flow the observer saw for it.

use crate::flow::FlowRecord;
use crate::probe::ActiveRecord;
use serde::{Deserialize, Serialize};

/// One row of a job's result array: a connector attempt joined with the
/// observer's view of the same traffic, if any arrived before the merge
/// deadline. `observed == false` with `flow.is_some()` never happens; it
/// marks the case spec §9 calls out explicitly — packets went out but the
/// observer never matched a flow for them (interface mismatch, packet
/// loss in capture, etc).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSlot {
    pub active: ActiveRecord,
    pub flow: Option<FlowRecord>,
    pub observed: bool,
}

impl FlowSlot {
    pub fn unobserved(active: ActiveRecord) -> Self {
        Self {
            active,
            flow: None,
            observed: false,
        }
    }

    pub fn merged(active: ActiveRecord, flow: FlowRecord) -> Self {
        Self {
            active,
            flow: Some(flow),
            observed: true,
        }
    }
}

#[cfg(test)]
#[path = "flow_slot_tests.rs"]
mod tests;
