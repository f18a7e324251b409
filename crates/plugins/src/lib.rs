// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Built-in measurement plugins: ecn, tfo, h2 (spec §4.5).

mod ecn;
mod h2;
pub mod helpers;
mod tfo;

pub mod plugin;
pub mod registry;

pub use ecn::EcnPlugin;
pub use h2::H2Plugin;
pub use helpers::combine_connectivity;
pub use plugin::{ConnectKind, Plugin};
pub use registry::{plugin_by_name, PluginKind};
pub use tfo::TfoPlugin;
