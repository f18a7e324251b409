// SPDX-License-Identifier: MIT

//! Canonical flow keys.
//!
//! Open question from spec §9: how to canonicalize a 5-tuple when the
//! vantage point sits between two capture points. This crate's convention:
//! the endpoint whose address is in the configured local-address set is
//! "forward" (outbound from the vantage point); if neither or both sides
//! match (no local-address set configured, or a loopback capture), the
//! lexicographically smaller `(addr, port)` pair is forward. This keeps
//! canonicalization total and deterministic even without a local-address
//! set, while preferring the documented convention when one is available.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    Tcp,
}

/// A canonical flow key: the local (vantage-point) endpoint and the remote
/// endpoint of one TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiveTuple {
    pub protocol: Protocol,
    pub local_addr: IpAddr,
    pub local_port: u16,
    pub remote_addr: IpAddr,
    pub remote_port: u16,
}

impl FiveTuple {
    pub fn new(
        protocol: Protocol,
        local_addr: IpAddr,
        local_port: u16,
        remote_addr: IpAddr,
        remote_port: u16,
    ) -> Self {
        Self {
            protocol,
            local_addr,
            local_port,
            remote_addr,
            remote_port,
        }
    }
}

/// Which way a packet was travelling relative to the canonical 5-tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Outbound from the local (vantage point) address.
    Forward,
    /// Inbound to the local address.
    Reverse,
}

/// Canonicalize one packet's (src, dst) pair into a [`FiveTuple`] plus the
/// [`Direction`] this particular packet travelled.
pub fn canonicalize(
    protocol: Protocol,
    src_addr: IpAddr,
    src_port: u16,
    dst_addr: IpAddr,
    dst_port: u16,
    local_addrs: &HashSet<IpAddr>,
) -> (FiveTuple, Direction) {
    let src_is_local = local_addrs.contains(&src_addr);
    let dst_is_local = local_addrs.contains(&dst_addr);

    let src_is_forward = if src_is_local != dst_is_local {
        src_is_local
    } else {
        (src_addr, src_port) <= (dst_addr, dst_port)
    };

    if src_is_forward {
        (
            FiveTuple::new(protocol, src_addr, src_port, dst_addr, dst_port),
            Direction::Forward,
        )
    } else {
        (
            FiveTuple::new(protocol, dst_addr, dst_port, src_addr, src_port),
            Direction::Reverse,
        )
    }
}

#[cfg(test)]
#[path = "five_tuple_tests.rs"]
mod tests;
