// SPDX-License-Identifier: MIT

//! `pathspider metadata` - derive a time-range sidecar JSON from a result
//! file, grounded in
//! `examples/original_source/pathspider/cmd/metadata.py`.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use pathspider_core::Verdict;
use serde_json::json;

#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Result file to summarize (newline-delimited verdicts)
    pub input: PathBuf,

    /// Additional metadata entries as `key:value`
    #[arg(long = "add", value_name = "KEY:VALUE")]
    pub entries: Vec<String>,
}

pub fn handle(args: MetadataArgs) -> Result<()> {
    let (start, end) = time_range(&args.input)?;

    let mut metadata = json!({
        "_time_start": start.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "_time_end": end.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "_file_type": "pathspider-rs-ndjson",
    });

    for entry in &args.entries {
        let (key, value) = entry
            .split_once(':')
            .with_context(|| format!("malformed --add entry (expected KEY:VALUE): {entry}"))?;
        metadata[key] = json!(value);
    }

    let meta_path = sidecar_path(&args.input);
    let mut file = File::create(&meta_path)
        .with_context(|| format!("failed to create {}", meta_path.display()))?;
    serde_json::to_writer_pretty(&mut file, &metadata)?;
    file.write_all(b"\n")?;

    Ok(())
}

fn sidecar_path(input: &std::path::Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".meta.json");
    PathBuf::from(name)
}

/// Scans every verdict line for its `started_at_ms`/`finished_at_ms` span
/// and returns the earliest start and latest end across the whole file.
fn time_range(path: &PathBuf) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut start: Option<i64> = None;
    let mut end: Option<i64> = None;

    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let verdict: Verdict =
            serde_json::from_str(&line).with_context(|| format!("malformed result line: {line}"))?;

        let started = verdict.started_at_ms as i64;
        let finished = verdict.finished_at_ms as i64;
        start = Some(start.map_or(started, |y| y.min(started)));
        end = Some(end.map_or(finished, |z| z.max(finished)));
    }

    let start = start.context("result file contains no verdicts")?;
    let end = end.context("result file contains no verdicts")?;

    Ok((
        DateTime::from_timestamp_millis(start).context("out-of-range start timestamp")?,
        DateTime::from_timestamp_millis(end).context("out-of-range end timestamp")?,
    ))
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
