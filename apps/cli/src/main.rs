//! Echo Base CLI: normalizes catalog records into the Echo Base dataset.
//!
//! Reads the seed planets and Echo Base documents, resolves them against
//! the remote catalog and writes the normalized outputs.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
