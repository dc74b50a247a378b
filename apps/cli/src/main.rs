//! llmsgen CLI: builds llms.txt exports for a documentation site.
//!
//! Walks the site tree for Markdown documents, reads the built site's route
//! tree for titles and descriptions, and writes `llms.txt` and
//! `llms-full.txt` into the output directory.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = commands::resolve_config(&cli)?;
    commands::init_tracing(&cli, config.debug);
    commands::run(cli, config).await
}
