// SPDX-License-Identifier: MIT

//! pathspider - active network path measurement CLI.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{measure, metadata, upload};

#[derive(Parser)]
#[command(name = "pathspider", version, about = "Active network path measurement")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a measurement plugin against a target list
    Measure(measure::MeasureArgs),
    /// Derive a time-range sidecar from a result file
    Metadata(metadata::MetadataArgs),
    /// Upload a result file and its metadata sidecar to a remote archive
    Upload(upload::UploadArgs),
}

#[tokio::main]
async fn main() {
    setup_logging();

    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Measure(args) => measure::handle(args).await,
        Commands::Metadata(args) => metadata::handle(args),
        Commands::Upload(args) => upload::handle(args).await,
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
