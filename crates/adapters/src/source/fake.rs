// SPDX-License-Identifier: MIT

//! Fake packet source: replays an in-memory packet list.

use super::{Packet, PacketSource, SourceError};
use async_trait::async_trait;
use std::collections::VecDeque;

pub struct FakeSource {
    packets: VecDeque<Packet>,
}

impl FakeSource {
    pub fn new(packets: Vec<Packet>) -> Self {
        Self {
            packets: packets.into(),
        }
    }
}

#[async_trait]
impl PacketSource for FakeSource {
    async fn next_packet(&mut self) -> Result<Option<Packet>, SourceError> {
        Ok(self.packets.pop_front())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
