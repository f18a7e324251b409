// SPDX-License-Identifier: MIT

//! TCP Fast Open cookie analyzer (spec §4.3): parses the SYN's options for
//! a Fast Open cookie and matches it against the SYN-ACK that follows.

use crate::chain::Analyzer;
use crate::packet::{Direction, ParsedPacket};
use pathspider_core::{parse_tcp_options, tfo_cookie, FlowRecord};

pub struct TfoChain;

impl Analyzer for TfoChain {
    fn on_packet(&self, record: &mut FlowRecord, packet: &ParsedPacket, _direction: Direction) -> bool {
        if !packet.syn {
            return true;
        }

        let opts = parse_tcp_options(packet.tcp_options);
        let (kind, cookie) = tfo_cookie(&opts);

        if !packet.ack {
            if let Some(kind) = kind {
                record.tfo.tfo_synkind = kind;
                record.tfo.tfo_synclen = cookie.map(<[u8]>::len).unwrap_or(0);
                record.tfo.tfo_seq = packet.sequence_number;
                record.tfo.tfo_dlen = packet.payload_len;
                record.tfo.tfo_ack = 0;
            }
        } else if record.tfo.tfo_synkind != 0 {
            record.tfo.tfo_ack = packet.acknowledgment_number;
            if let Some(kind) = kind {
                record.tfo.tfo_ackkind = kind;
                record.tfo.tfo_ackclen = cookie.map(<[u8]>::len).unwrap_or(0);
            }
        }

        true
    }
}

#[cfg(test)]
#[path = "tfo_chain_tests.rs"]
mod tests;
