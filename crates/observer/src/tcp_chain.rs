// SPDX-License-Identifier: MIT

//! TCP handshake/completion analyzer (spec §4.3).

use crate::chain::Analyzer;
use crate::packet::{Direction, ParsedPacket};
use pathspider_core::FlowRecord;

pub struct TcpChain;

impl Analyzer for TcpChain {
    fn on_packet(&self, record: &mut FlowRecord, packet: &ParsedPacket, direction: Direction) -> bool {
        if packet.syn && !packet.ack {
            let flags = syn_flags(packet);
            match direction {
                Direction::Forward => record.tcp.tcp_synflags_fwd = flags,
                Direction::Reverse => record.tcp.tcp_synflags_rev = flags,
            }
        } else if packet.syn && packet.ack {
            let flags = syn_flags(packet);
            match direction {
                Direction::Forward => record.tcp.tcp_synflags_fwd = flags,
                Direction::Reverse => record.tcp.tcp_synflags_rev = flags,
            }
            record.tcp.tcp_connected = true;
        }

        if packet.fin {
            match direction {
                Direction::Forward => record.tcp.tcp_fin_fwd = true,
                Direction::Reverse => record.tcp.tcp_fin_rev = true,
            }
        }
        if packet.rst {
            match direction {
                Direction::Forward => record.tcp.tcp_rst_fwd = true,
                Direction::Reverse => record.tcp.tcp_rst_rev = true,
            }
        }

        true
    }
}

/// Reassemble the flags octet `TCP_SEC`/`TCP_SAE`/`TCP_SAEC` are matched
/// against from the decoded per-flag booleans.
fn syn_flags(packet: &ParsedPacket) -> u8 {
    let mut flags = 0u8;
    if packet.syn {
        flags |= pathspider_core::tcp::TCP_SYN;
    }
    if packet.ack {
        flags |= pathspider_core::tcp::TCP_ACK;
    }
    if packet.ece {
        flags |= pathspider_core::tcp::TCP_ECE;
    }
    if packet.cwr {
        flags |= pathspider_core::tcp::TCP_CWR;
    }
    flags
}

#[cfg(test)]
#[path = "tcp_chain_tests.rs"]
mod tests;
