// SPDX-License-Identifier: MIT

//! TCP flag bits and the per-flow fields owned by the TCP analyzer chain.

use serde::{Deserialize, Serialize};

/// Raw TCP flag bits (as laid out in the TCP header's flags octet).
pub const TCP_FIN: u8 = 0x01;
pub const TCP_SYN: u8 = 0x02;
pub const TCP_RST: u8 = 0x04;
pub const TCP_PSH: u8 = 0x08;
pub const TCP_ACK: u8 = 0x10;
pub const TCP_URG: u8 = 0x20;
pub const TCP_ECE: u8 = 0x40;
pub const TCP_CWR: u8 = 0x80;

/// SYN with ECN-Echo and Congestion-Window-Reduced set: an ECN negotiation
/// request from the client.
pub const TCP_SEC: u8 = TCP_SYN | TCP_ECE | TCP_CWR;
/// SYN-ACK with ECN-Echo set but CWR clear: the server accepted negotiation.
pub const TCP_SAE: u8 = TCP_SYN | TCP_ACK | TCP_ECE;
/// SYN-ACK with ECN-Echo and CWR set: the server reflected the request
/// without actually supporting ECN.
pub const TCP_SAEC: u8 = TCP_SYN | TCP_ACK | TCP_ECE | TCP_CWR;

/// Per-flow fields owned by the TCP analyzer chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpFields {
    /// Flags byte of the first SYN seen in each direction.
    #[serde(default)]
    pub tcp_synflags_fwd: u8,
    #[serde(default)]
    pub tcp_synflags_rev: u8,
    /// True once a SYN-ACK matching the flow's SYN has been observed.
    #[serde(default)]
    pub tcp_connected: bool,
    #[serde(default)]
    pub tcp_fin_fwd: bool,
    #[serde(default)]
    pub tcp_fin_rev: bool,
    #[serde(default)]
    pub tcp_rst_fwd: bool,
    #[serde(default)]
    pub tcp_rst_rev: bool,
}

impl TcpFields {
    /// True once both directions have sent a FIN, or either side has sent
    /// a RST: the flow's completion predicate (spec §4.3).
    pub fn is_complete(&self) -> bool {
        (self.tcp_fin_fwd && self.tcp_fin_rev) || self.tcp_rst_fwd || self.tcp_rst_rev
    }
}

#[cfg(test)]
#[path = "tcp_tests.rs"]
mod tests;
