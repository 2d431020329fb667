//! Command-line runner for Gemini Voice batches.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::Result;
use clap::Parser;

mod batch_files;
mod cli;
mod commands;
mod config_commands;

use cli::{Cli, Commands};
use gemini_voice_core::logger::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Run(args) => commands::run_batch(cli.config.as_deref(), args).await,
        Commands::Config(cmd) => commands::handle_config_command(cli.config.as_deref(), cmd).await,
    }
}
