// SPDX-License-Identifier: MIT

//! Drives a packet source through the flow table and analyzer chains,
//! emitting completed flow records (spec §4.3).

use crate::chain::{run_new_flow, run_on_packet, Analyzer};
use crate::error::ObserverError;
use crate::flow_table::FlowTable;
use crate::packet::{self, ParseError};
use pathspider_adapters::PacketSource;
use pathspider_core::FlowRecord;
use std::collections::HashSet;
use std::net::IpAddr;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default per-flow idle timeout (spec §5).
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 30_000;

pub struct Observer {
    source: Box<dyn PacketSource>,
    chains: Vec<Box<dyn Analyzer>>,
    local_addrs: HashSet<IpAddr>,
    flow_table: FlowTable,
    last_timestamp_ms: u64,
}

impl Observer {
    pub fn new(
        source: Box<dyn PacketSource>,
        chains: Vec<Box<dyn Analyzer>>,
        local_addrs: HashSet<IpAddr>,
        idle_timeout_ms: u64,
    ) -> Self {
        Self {
            source,
            chains,
            local_addrs,
            flow_table: FlowTable::new(idle_timeout_ms),
            last_timestamp_ms: 0,
        }
    }

    /// Run until the source is exhausted, sending every completed flow
    /// (on close or idle eviction) over `out`. On return, every remaining
    /// flow has been drained and sent.
    pub async fn run(mut self, out: mpsc::Sender<FlowRecord>) -> Result<(), ObserverError> {
        let span = tracing::info_span!("observer_run");
        let _enter = span.enter();

        loop {
            let packet = self.source.next_packet().await?;
            let Some(packet) = packet else { break };
            self.last_timestamp_ms = packet.timestamp_ms;

            match packet::parse(packet.timestamp_ms, &packet.data, &self.local_addrs) {
                Ok(parsed) => self.dispatch(parsed, &out).await?,
                Err(ParseError::NotTcp) => {}
                Err(ParseError::Malformed(reason)) => {
                    warn!(reason, "dropping unparseable packet");
                }
            }

            for flow in self.flow_table.evict_idle(self.last_timestamp_ms) {
                out.send(flow).await.map_err(|_| ObserverError::ChannelClosed)?;
            }
        }

        debug!(remaining = self.flow_table.len(), "draining observer on source exhaustion");
        for flow in self.flow_table.drain_all() {
            out.send(flow).await.map_err(|_| ObserverError::ChannelClosed)?;
        }

        Ok(())
    }

    async fn dispatch(
        &mut self,
        parsed: packet::ParsedPacket<'_>,
        out: &mpsc::Sender<FlowRecord>,
    ) -> Result<(), ObserverError> {
        let key = parsed.five_tuple;

        if !self.flow_table.contains(&key) {
            let mut candidate = FlowRecord::new(key, parsed.timestamp_ms);
            if !run_new_flow(&self.chains, &mut candidate, &parsed) {
                return Ok(());
            }
            self.flow_table.insert(key, candidate);
        }

        let Some(record) = self.flow_table.get_mut(&key) else {
            return Ok(());
        };

        run_on_packet(&self.chains, record, &parsed, parsed.direction);
        record.last_seen_ms = parsed.timestamp_ms;
        match parsed.direction {
            pathspider_core::Direction::Forward => {
                record.packets_fwd += 1;
                record.bytes_fwd += parsed.payload_len as u64;
            }
            pathspider_core::Direction::Reverse => {
                record.packets_rev += 1;
                record.bytes_rev += parsed.payload_len as u64;
            }
        }

        if record.is_complete() {
            if let Some(finished) = self.flow_table.remove(&key) {
                out.send(finished).await.map_err(|_| ObserverError::ChannelClosed)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
