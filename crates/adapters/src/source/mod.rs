// SPDX-License-Identifier: MIT

//! Packet sources the observer reads from.

mod pcap_file;

pub use pcap_file::PcapFileSource;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSource;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open capture {0}: {1}")]
    Open(String, std::io::Error),
    #[error("malformed capture record: {0}")]
    Malformed(String),
}

/// One captured frame, as handed to the observer's analyzer chains.
///
/// `data` holds the raw link-layer frame (Ethernet); the observer is
/// responsible for parsing IP/TCP headers out of it.
#[derive(Debug, Clone)]
pub struct Packet {
    pub timestamp_ms: u64,
    pub data: Vec<u8>,
}

/// A source of captured packets (spec §4.3). Implementations may read a
/// recorded capture file or, in production, mirror a live interface.
#[async_trait]
pub trait PacketSource: Send {
    /// Read the next packet, or `None` once the source is exhausted.
    async fn next_packet(&mut self) -> Result<Option<Packet>, SourceError>;
}
