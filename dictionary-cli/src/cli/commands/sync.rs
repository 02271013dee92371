//! `check` and `sync` handlers

use anyhow::Result;
use colored::*;
use std::process::ExitCode;

use super::CommandContext;
use crate::sync::{ChangeSummary, SyncOutcome};

pub async fn handle_check_command(ctx: &CommandContext) -> Result<ExitCode> {
    let workflow = ctx.sync_workflow();
    match workflow.preview().await {
        Ok(ChangeSummary::NoChanges) => {
            println!("{}", "There are no changes in the database schema.".cyan());
            Ok(ExitCode::SUCCESS)
        }
        Ok(ChangeSummary::Changes(message)) => {
            println!("{}", message);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log::error!("Schema check failed: {}", err);
            anyhow::bail!("Schema check failed: {}", err.user_message())
        }
    }
}

pub async fn handle_sync_command(ctx: &CommandContext) -> Result<ExitCode> {
    let workflow = ctx.sync_workflow();
    let outcome = workflow.run().await;
    log::debug!("Sync finished with {:?}", outcome);

    Ok(match outcome {
        SyncOutcome::NoChanges | SyncOutcome::Synced => ExitCode::SUCCESS,
        SyncOutcome::Declined => {
            println!("{}", "Sync cancelled.".dimmed());
            ExitCode::SUCCESS
        }
        SyncOutcome::Failed(_) | SyncOutcome::Superseded => ExitCode::FAILURE,
    })
}
