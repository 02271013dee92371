//! `info`, `tables` and `save` handlers

use anyhow::{Context, Result};
use colored::*;
use std::process::ExitCode;
use std::sync::Arc;

use super::CommandContext;
use crate::dictionary::DescriptionEditor;
use crate::render::{render_database_info, render_table, render_table_list};
use crate::submit::{SubmitOutcome, UpdateSubmitter};

pub fn handle_info_command(ctx: &CommandContext) -> Result<ExitCode> {
    let snapshot = ctx.load_snapshot()?;
    println!("{}", render_database_info(&snapshot.database));
    println!(
        "{}",
        format!(
            "{} tables, {} columns",
            snapshot.tables().len(),
            snapshot.column_count()
        )
        .dimmed()
    );
    Ok(ExitCode::SUCCESS)
}

pub fn handle_tables_command(ctx: &CommandContext, table: Option<String>) -> Result<ExitCode> {
    let snapshot = ctx.load_snapshot()?;

    match table {
        Some(name) => {
            let table = snapshot
                .table_index(&name)
                .and_then(|idx| snapshot.table(idx))
                .with_context(|| format!("No table named '{}' in the dictionary", name))?;
            println!("{}", render_table(table));
        }
        None if snapshot.tables().is_empty() => {
            println!("{}", "The dictionary has no tables.".yellow());
        }
        None => println!("{}", render_table_list(snapshot.tables())),
    }
    Ok(ExitCode::SUCCESS)
}

/// Description edits given on the `save` command line
#[derive(Debug, Clone, Default)]
pub struct SaveEdits {
    pub table_description: Option<String>,
    /// (column name, text)
    pub columns: Vec<(String, String)>,
    /// (column id, text)
    pub column_ids: Vec<(String, String)>,
}

pub async fn handle_save_command(
    ctx: &CommandContext,
    table: &str,
    edits: &SaveEdits,
) -> Result<ExitCode> {
    let mut editor = DescriptionEditor::new(ctx.load_snapshot()?);
    let table_idx = apply_edits(&mut editor, table, edits)?;

    let submitter = UpdateSubmitter::new(Arc::clone(&ctx.api), Arc::clone(&ctx.prompter));
    let outcome = submitter.submit(&editor, table_idx).await?;

    Ok(match outcome {
        SubmitOutcome::Saved => ExitCode::SUCCESS,
        SubmitOutcome::Declined => {
            println!("{}", "Nothing was saved.".dimmed());
            ExitCode::SUCCESS
        }
        // Already reported by the submitter
        SubmitOutcome::Failed(_) => ExitCode::FAILURE,
    })
}

/// Apply command-line edits to one table and return its index
///
/// The table is looked up by name or id. Columns given by id must belong to
/// that table, since only it is saved.
pub fn apply_edits(editor: &mut DescriptionEditor, table: &str, edits: &SaveEdits) -> Result<usize> {
    let table_idx = editor
        .table_position(table)
        .with_context(|| format!("Cannot save table '{}'", table))?;

    if let Some(text) = &edits.table_description {
        editor.set_table_description(table_idx, text)?;
    }
    for (name, text) in &edits.columns {
        let col_idx = editor
            .column_position(table_idx, name)
            .with_context(|| format!("Cannot describe column '{}'", name))?;
        editor.set_column_description(table_idx, col_idx, text)?;
    }
    for (col_id, text) in &edits.column_ids {
        let (owner, _) = editor
            .column_position_by_id(col_id)
            .with_context(|| format!("Cannot describe column with id '{}'", col_id))?;
        if owner != table_idx {
            anyhow::bail!("Column id '{}' does not belong to table '{}'", col_id, table);
        }
        editor.set_column_description_by_id(col_id, text)?;
    }
    Ok(table_idx)
}

/// Parse a `NAME=TEXT` column edit; the text may be empty
pub fn parse_column_edit(raw: &str) -> Result<(String, String), String> {
    let (name, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TEXT, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing column name in '{}'", raw));
    }
    Ok((name.to_string(), text.to_string()))
}
