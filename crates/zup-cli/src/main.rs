//! zup - Zig compiler version manager.
//!
//! Downloads zig compilers, keeps any number of them side by side, and
//! points a single default at the one you work with.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod styles;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize telemetry
    zup_telemetry::init(cli.global.verbose);

    // Run the command
    let exit_code = commands::run(cli).await?;

    std::process::exit(exit_code);
}
