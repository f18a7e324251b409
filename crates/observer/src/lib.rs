// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Packet source → flow table → analyzer chains → completed flow records.

pub mod chain;
pub mod ecn_chain;
pub mod error;
pub mod flow_table;
mod observer;
pub mod packet;
pub mod tcp_chain;
pub mod tfo_chain;

pub use chain::Analyzer;
pub use ecn_chain::EcnChain;
pub use error::ObserverError;
pub use flow_table::FlowTable;
pub use observer::{Observer, DEFAULT_IDLE_TIMEOUT_MS};
pub use packet::{parse, Direction, ParseError, ParsedPacket};
pub use tcp_chain::TcpChain;
pub use tfo_chain::TfoChain;
