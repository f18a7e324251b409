// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: dialing targets, reading captured packets,
//! and writing results.

pub mod connector;
pub mod sink;
pub mod source;
pub mod subprocess;

pub use connector::{ConnectorAdapter, ConnectorError, HttpConnector, HttpVersion, Scheme, TcpConnector, TfoConnector};
pub use sink::{NdjsonSink, ResultSink, SinkError};
pub use source::{PacketSource, PcapFileSource, Packet, SourceError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use connector::{ConnectorCall, FakeConnector};
#[cfg(any(test, feature = "test-support"))]
pub use sink::FakeSink;
#[cfg(any(test, feature = "test-support"))]
pub use source::FakeSource;
