// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("packet source failed: {0}")]
    Source(#[from] pathspider_adapters::SourceError),
    #[error("observer output channel closed")]
    ChannelClosed,
}
