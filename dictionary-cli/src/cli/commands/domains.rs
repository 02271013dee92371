//! `domains` handlers

use anyhow::{Context, Result};
use colored::*;
use std::process::ExitCode;
use std::sync::Arc;

use super::CommandContext;
use crate::cli::DomainCommands;
use crate::dictionary::DictionarySnapshot;
use crate::domains::DomainRegistry;

pub async fn handle_domains_command(ctx: &CommandContext, command: DomainCommands) -> Result<ExitCode> {
    let registry = DomainRegistry::new(Arc::clone(&ctx.api));

    match command {
        DomainCommands::List => {
            let domains = registry.list().await.context("Failed to fetch domains")?;
            if domains.is_empty() {
                println!("{}", "No domains defined.".yellow());
            }
            for domain in domains {
                println!("{}  {}", domain.name.bright_cyan().bold(), domain.description);
            }
        }
        DomainCommands::Create { name, description } => {
            let domain = registry
                .create(&name, &description)
                .await
                .context("Failed to create domain")?;
            println!("{} {}", "Created domain".bright_green(), domain.name.bold());
        }
        DomainCommands::Link { table, domain } => {
            let table_id = match &ctx.config.bootstrap_path {
                Some(_) => resolve_table_id(&ctx.load_snapshot()?, &table),
                None => table,
            };
            let link = registry
                .link(&table_id, &domain)
                .await
                .context("Failed to link table to domain")?;
            println!(
                "{} {} -> {}",
                "Linked".bright_green(),
                link.table_id,
                link.domain_name.bold()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Map a table name to its id; anything else is taken as an id already
fn resolve_table_id(snapshot: &DictionarySnapshot, table: &str) -> String {
    snapshot
        .table_index(table.trim())
        .and_then(|idx| snapshot.table(idx))
        .map(|t| t.id.clone())
        .unwrap_or_else(|| table.to_string())
}
