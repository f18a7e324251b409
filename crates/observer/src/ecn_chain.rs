// SPDX-License-Identifier: MIT

//! ECN codepoint analyzer (spec §4.3): records which IP-header ECN
//! codepoint was seen, split by SYN vs. data packet and by direction.

use crate::chain::Analyzer;
use crate::packet::{Direction, ParsedPacket};
use pathspider_core::{EcnCodepoint, FlowRecord};

pub struct EcnChain;

impl Analyzer for EcnChain {
    fn on_packet(&self, record: &mut FlowRecord, packet: &ParsedPacket, direction: Direction) -> bool {
        let codepoint = EcnCodepoint::from_bits(packet.ip_ecn_bits);
        let is_syn = packet.syn;
        let has_data = packet.payload_len > 0;

        match (codepoint, direction, is_syn) {
            (EcnCodepoint::Ect0, Direction::Forward, true) => record.ecn.ecn_ect0_syn_fwd = true,
            (EcnCodepoint::Ect0, Direction::Reverse, true) => record.ecn.ecn_ect0_syn_rev = true,
            (EcnCodepoint::Ect1, Direction::Forward, true) => record.ecn.ecn_ect1_syn_fwd = true,
            (EcnCodepoint::Ect1, Direction::Reverse, true) => record.ecn.ecn_ect1_syn_rev = true,
            (EcnCodepoint::Ce, Direction::Forward, true) => record.ecn.ecn_ce_syn_fwd = true,
            (EcnCodepoint::Ce, Direction::Reverse, true) => record.ecn.ecn_ce_syn_rev = true,
            _ => {}
        }

        if has_data {
            match (codepoint, direction) {
                (EcnCodepoint::Ect0, Direction::Forward) => record.ecn.ecn_ect0_data_fwd = true,
                (EcnCodepoint::Ect0, Direction::Reverse) => record.ecn.ecn_ect0_data_rev = true,
                (EcnCodepoint::Ect1, Direction::Forward) => record.ecn.ecn_ect1_data_fwd = true,
                (EcnCodepoint::Ect1, Direction::Reverse) => record.ecn.ecn_ect1_data_rev = true,
                (EcnCodepoint::Ce, Direction::Forward) => record.ecn.ecn_ce_data_fwd = true,
                (EcnCodepoint::Ce, Direction::Reverse) => record.ecn.ecn_ce_data_rev = true,
                (EcnCodepoint::NotEct, _) => {}
            }
        }

        true
    }
}

#[cfg(test)]
#[path = "ecn_chain_tests.rs"]
mod tests;
