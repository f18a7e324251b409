// SPDX-License-Identifier: MIT

//! Per-flow fields owned by the TCP Fast Open analyzer chain.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfoFields {
    /// Option kind (34, 254, or 255) seen on the SYN; 0 if none.
    #[serde(default)]
    pub tfo_synkind: u8,
    /// Option kind seen on the matching SYN-ACK; 0 if none.
    #[serde(default)]
    pub tfo_ackkind: u8,
    #[serde(default)]
    pub tfo_synclen: usize,
    #[serde(default)]
    pub tfo_ackclen: usize,
    /// Sequence number of the SYN that carried the cookie/data.
    #[serde(default)]
    pub tfo_seq: u32,
    /// Length of the application payload carried on the SYN.
    #[serde(default)]
    pub tfo_dlen: usize,
    /// ACK number of the SYN-ACK that acknowledged the SYN's data.
    #[serde(default)]
    pub tfo_ack: u32,
}

impl TfoFields {
    /// True once a SYN-ACK carrying a recognized cookie kind has arrived.
    pub fn negotiated(&self) -> bool {
        self.tfo_ackkind != 0
    }
}

#[cfg(test)]
#[path = "tfo_tests.rs"]
mod tests;
