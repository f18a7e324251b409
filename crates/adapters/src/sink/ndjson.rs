// SPDX-License-Identifier: MIT

//! Newline-delimited JSON sink, the tool's default output format.

use super::{ResultSink, SinkError};
use async_trait::async_trait;
use pathspider_core::Verdict;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub struct NdjsonSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> NdjsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ResultSink for NdjsonSink<W> {
    async fn write(&mut self, verdict: &Verdict) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(verdict)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "ndjson_tests.rs"]
mod tests;
