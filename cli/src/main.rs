//! Terminal moderation console for Volun.

#![allow(clippy::exit)]

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod prompt;
mod timing;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use volun_business::BusinessConfig;

use crate::cli::{Cli, Commands};
use crate::commands::{
    generate_completions, run_console, run_delete, run_login, run_suspend, run_users, run_warn,
};
use crate::config::StoredConfig;
use crate::context::CliContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with timing support
    timing::init_tracing(cli.verbose, cli.timing);

    let command = cli.command.unwrap_or(Commands::Console);
    if let Commands::Completions { shell } = command {
        generate_completions(shell);
        return Ok(());
    }

    let file_config = StoredConfig::open_default();
    let business = BusinessConfig::from_env().context("Failed to read VOLUN_* environment")?;
    let business = file_config
        .config
        .business_config(business, cli.api_url.as_deref());

    let ctx = CliContext::new(business, file_config, cli.email, cli.password);

    match command {
        Commands::Login => run_login(ctx).await,
        Commands::Users => run_users(ctx).await,
        Commands::Suspend { id } => run_suspend(ctx, id).await,
        Commands::Warn { id, message } => run_warn(ctx, id, message).await,
        Commands::Delete { id } => run_delete(ctx, id).await,
        Commands::Console => run_console(ctx).await,
        Commands::Completions { .. } => Ok(()),
    }
}
