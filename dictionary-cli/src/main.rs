mod api;
mod cli;
mod config;
mod dictionary;
mod domains;
mod prompt;
mod render;
mod submit;
mod sync;

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::process::ExitCode;

use cli::commands::{CommandContext, dictionary as dictionary_cmd, domains as domains_cmd, session, sync as sync_cmd};
use cli::{Cli, Commands};
use config::ClientConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = ClientConfig::load(cli.config.as_deref(), &cli.overrides())?;
    if !config.color {
        colored::control::set_override(false);
    }
    let ctx = CommandContext::from_config(config)?;

    match cli.command {
        Commands::Info => dictionary_cmd::handle_info_command(&ctx),
        Commands::Tables { table } => dictionary_cmd::handle_tables_command(&ctx, table),
        Commands::Check => sync_cmd::handle_check_command(&ctx).await,
        Commands::Sync => sync_cmd::handle_sync_command(&ctx).await,
        Commands::Save {
            table,
            table_description,
            columns,
            column_ids,
        } => {
            let edits = dictionary_cmd::SaveEdits {
                table_description,
                columns,
                column_ids,
            };
            dictionary_cmd::handle_save_command(&ctx, &table, &edits).await
        }
        Commands::Domains(command) => domains_cmd::handle_domains_command(&ctx, command).await,
        Commands::Session => session::handle_session_command(&ctx).await,
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
