// SPDX-License-Identifier: MIT

//! Replay packets out of a recorded pcap capture file.

use super::{Packet, PacketSource, SourceError};
use async_trait::async_trait;
use pcap_file::pcap::PcapReader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct PcapFileSource {
    reader: PcapReader<BufReader<File>>,
}

impl PcapFileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| SourceError::Open(path.display().to_string(), err))?;
        let reader = PcapReader::new(BufReader::new(file)).map_err(|err| {
            SourceError::Open(path.display().to_string(), std::io::Error::other(err))
        })?;
        Ok(Self { reader })
    }
}

#[async_trait]
impl PacketSource for PcapFileSource {
    async fn next_packet(&mut self) -> Result<Option<Packet>, SourceError> {
        match self.reader.next_packet() {
            Some(Ok(packet)) => {
                let timestamp_ms = packet.timestamp.as_millis() as u64;
                Ok(Some(Packet {
                    timestamp_ms,
                    data: packet.data.into_owned(),
                }))
            }
            Some(Err(err)) => Err(SourceError::Malformed(err.to_string())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "pcap_file_tests.rs"]
mod tests;
