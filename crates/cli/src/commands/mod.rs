// SPDX-License-Identifier: MIT

//! Subcommand implementations (spec §6).

pub mod measure;
pub mod metadata;
pub mod upload;
