//! sdkdocs CLI: generate Sphinx documentation sources for a Go SDK.
//!
//! Turns the SDK README, `go doc` output and example programs into a
//! Sphinx/MyST source tree ready for `sphinx-build`.

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
