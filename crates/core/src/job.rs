// SPDX-License-Identifier: MIT

//! Job: an immutable target descriptor.

use crate::id::JobId;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Raw shape of one line of the target-list input (schema in spec §6):
/// `{ip, port, domain?, rank?, ...tags}`. The reader that produces these
/// (a newline-delimited file, external collaborator) is out of scope; this
/// type is the contract it must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub ip: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
    /// Any other keys present on the input line (free-form tag map).
    #[serde(flatten)]
    pub tags: serde_json::Map<String, serde_json::Value>,
}

/// An immutable target descriptor.
///
/// Created by the job source when a [`JobRecord`] is read, and destroyed
/// once its last derived record (flow or verdict) has been emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub ip: IpAddr,
    pub port: u16,
    pub domain: Option<String>,
    pub rank: Option<u32>,
    pub tags: serde_json::Map<String, serde_json::Value>,
}

impl Job {
    pub fn from_record(id: JobId, record: JobRecord) -> Self {
        Self {
            id,
            ip: record.ip,
            port: record.port,
            domain: record.domain,
            rank: record.rank,
            tags: record.tags,
        }
    }

    pub fn is_ipv6(&self) -> bool {
        self.ip.is_ipv6()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
