// SPDX-License-Identifier: MIT

//! `pathspider upload` - push a result file (and its metadata sidecar, if
//! present) to a remote archive.
//!
//! Grounded in `examples/original_source/pathspider/cmd/upload.py`, which
//! the `examples/original_source/_INDEX.md` retrieval turned up in three
//! divergent, near-duplicate revisions; per the Open Question resolution
//! recorded in DESIGN.md, only the newest-dated behavior — a single PUT of
//! the data file plus its metadata sidecar, authenticated with an
//! `Authorization: APIKEY` header — is reproduced here. The campaign
//! namespacing, duplicate-file probe, and bz2 compression of earlier
//! revisions are dropped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use reqwest::Client;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Result file to upload
    pub input: PathBuf,

    /// Base URL of the archive (the file is PUT to `{url}/{filename}`)
    #[arg(long)]
    pub url: String,

    /// API key sent as `Authorization: APIKEY <token>`
    #[arg(long)]
    pub token: String,

    /// Metadata sidecar to upload alongside the result file (defaults to
    /// `{input}.meta.json` if present)
    #[arg(long)]
    pub metadata: Option<PathBuf>,
}

pub async fn handle(args: UploadArgs) -> Result<()> {
    let client = Client::new();

    put_file(&client, &args.url, &args.token, &args.input).await?;

    let metadata = args
        .metadata
        .clone()
        .unwrap_or_else(|| sidecar_path(&args.input));
    if metadata.exists() {
        put_file(&client, &args.url, &args.token, &metadata).await?;
    }

    Ok(())
}

fn sidecar_path(input: &std::path::Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".meta.json");
    PathBuf::from(name)
}

async fn put_file(client: &Client, base_url: &str, token: &str, path: &std::path::Path) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("cannot determine filename of {}", path.display()))?;
    let url = format!("{}/{file_name}", base_url.trim_end_matches('/'));

    let body = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let response = client
        .put(&url)
        .header("Authorization", format!("APIKEY {token}"))
        .body(body)
        .send()
        .await
        .with_context(|| format!("failed to upload {}", path.display()))?;

    if !response.status().is_success() {
        anyhow::bail!("upload of {} failed: server returned {}", path.display(), response.status());
    }

    Ok(())
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
