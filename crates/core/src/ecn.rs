// SPDX-License-Identifier: MIT

//! Per-flow fields owned by the ECN analyzer chain.

use serde::{Deserialize, Serialize};

/// IP-layer ECN codepoints (lower two bits of the IPv4 TOS / IPv6 traffic
/// class octet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcnCodepoint {
    NotEct,
    Ect1,
    Ect0,
    Ce,
}

impl EcnCodepoint {
    /// Decode from the two ECN bits of the IP header's traffic-class octet.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => EcnCodepoint::Ect1,
            0b10 => EcnCodepoint::Ect0,
            0b11 => EcnCodepoint::Ce,
            _ => EcnCodepoint::NotEct,
        }
    }
}

/// Per-flow fields owned by the ECN analyzer chain: whether each codepoint
/// was observed on the SYN vs. on data packets, in each direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcnFields {
    #[serde(default)]
    pub ecn_ect0_syn_fwd: bool,
    #[serde(default)]
    pub ecn_ect0_syn_rev: bool,
    #[serde(default)]
    pub ecn_ect0_data_fwd: bool,
    #[serde(default)]
    pub ecn_ect0_data_rev: bool,
    #[serde(default)]
    pub ecn_ect1_syn_fwd: bool,
    #[serde(default)]
    pub ecn_ect1_syn_rev: bool,
    #[serde(default)]
    pub ecn_ect1_data_fwd: bool,
    #[serde(default)]
    pub ecn_ect1_data_rev: bool,
    #[serde(default)]
    pub ecn_ce_syn_fwd: bool,
    #[serde(default)]
    pub ecn_ce_syn_rev: bool,
    #[serde(default)]
    pub ecn_ce_data_fwd: bool,
    #[serde(default)]
    pub ecn_ce_data_rev: bool,
}

#[cfg(test)]
#[path = "ecn_tests.rs"]
mod tests;
