// SPDX-License-Identifier: MIT

//! Parses captured frames into the fields the analyzer chains need.

pub use pathspider_core::Direction;
use pathspider_core::{FiveTuple, Protocol};
use std::collections::HashSet;
use std::net::IpAddr;

/// A TCP/IP packet, decoded just enough for the analyzer chains: header
/// fields plus the raw TCP options bytes (so `pathspider_core::tcp_options`
/// can parse them without an extra copy).
pub struct ParsedPacket<'a> {
    pub timestamp_ms: u64,
    pub five_tuple: FiveTuple,
    pub direction: Direction,
    pub syn: bool,
    pub ack: bool,
    pub fin: bool,
    pub rst: bool,
    pub ece: bool,
    pub cwr: bool,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    pub ip_ecn_bits: u8,
    pub payload_len: usize,
    pub tcp_options: &'a [u8],
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to decode frame: {0}")]
    Malformed(String),
    #[error("not a TCP/IP packet")]
    NotTcp,
}

/// Decode an Ethernet frame into a [`ParsedPacket`], or `Err(ParseError::NotTcp)`
/// for anything the observer doesn't track (spec §4.3: only TCP is chained).
pub fn parse(
    timestamp_ms: u64,
    data: &[u8],
    local_addrs: &HashSet<IpAddr>,
) -> Result<ParsedPacket<'_>, ParseError> {
    let sliced = etherparse::SlicedPacket::from_ethernet(data)
        .map_err(|err| ParseError::Malformed(err.to_string()))?;

    let (src_ip, dst_ip, ecn_bits) = match &sliced.ip {
        Some(etherparse::InternetSlice::Ipv4(ipv4)) => (
            IpAddr::V4(ipv4.source_addr()),
            IpAddr::V4(ipv4.destination_addr()),
            ipv4.ecn(),
        ),
        Some(etherparse::InternetSlice::Ipv6(ipv6)) => {
            (IpAddr::V6(ipv6.source_addr()), IpAddr::V6(ipv6.destination_addr()), 0)
        }
        None => return Err(ParseError::NotTcp),
    };

    let tcp = match &sliced.transport {
        Some(etherparse::TransportSlice::Tcp(tcp)) => tcp,
        _ => return Err(ParseError::NotTcp),
    };

    let (five_tuple, direction) = pathspider_core::canonicalize(
        Protocol::Tcp,
        src_ip,
        tcp.source_port(),
        dst_ip,
        tcp.destination_port(),
        local_addrs,
    );

    Ok(ParsedPacket {
        timestamp_ms,
        five_tuple,
        direction,
        syn: tcp.syn(),
        ack: tcp.ack(),
        fin: tcp.fin(),
        rst: tcp.rst(),
        ece: tcp.ece(),
        cwr: tcp.cwr(),
        sequence_number: tcp.sequence_number(),
        acknowledgment_number: tcp.acknowledgment_number(),
        ip_ecn_bits: ecn_bits,
        payload_len: sliced.payload.len(),
        tcp_options: tcp.options(),
    })
}

#[cfg(test)]
#[path = "packet_tests.rs"]
mod tests;
