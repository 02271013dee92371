//! Interactive session over one loaded dictionary
//!
//! The bootstrap is read and assembled once. Edits stay in memory until a
//! table is saved; after a schema sync the data is stale and the session ends.

use anyhow::Result;
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use is_terminal::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use super::CommandContext;
use crate::dictionary::{DescriptionEditor, DictionarySnapshot};
use crate::render::{render_database_info, render_table, render_table_list};
use crate::submit::UpdateSubmitter;
use crate::sync::SyncOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ShowInfo,
    ListTables,
    ShowTable,
    EditTable,
    SaveTable,
    CheckAndSync,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        MenuAction::ShowInfo,
        MenuAction::ListTables,
        MenuAction::ShowTable,
        MenuAction::EditTable,
        MenuAction::SaveTable,
        MenuAction::CheckAndSync,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::ShowInfo => "Show database info",
            MenuAction::ListTables => "List tables",
            MenuAction::ShowTable => "Show a table",
            MenuAction::EditTable => "Edit descriptions of a table",
            MenuAction::SaveTable => "Save a table",
            MenuAction::CheckAndSync => "Check and sync database changes",
            MenuAction::Quit => "Quit",
        }
    }
}

pub async fn handle_session_command(ctx: &CommandContext) -> Result<ExitCode> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("The interactive session needs a terminal");
    }

    let mut editor = DescriptionEditor::new(ctx.load_snapshot()?);
    let submitter = UpdateSubmitter::new(Arc::clone(&ctx.api), Arc::clone(&ctx.prompter));
    let workflow = ctx.sync_workflow();
    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();

    println!("{}", render_database_info(&editor.snapshot().database));

    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("What do you want to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[choice] {
            MenuAction::ShowInfo => {
                println!("{}", render_database_info(&editor.snapshot().database));
            }
            MenuAction::ListTables => {
                println!("{}", render_table_list(editor.snapshot().tables()));
            }
            MenuAction::ShowTable => {
                if let Some(idx) = pick_table(&theme, editor.snapshot())? {
                    if let Some(table) = editor.snapshot().table(idx) {
                        println!("{}", render_table(table));
                    }
                }
            }
            MenuAction::EditTable => {
                if let Some(idx) = pick_table(&theme, editor.snapshot())? {
                    edit_table(&theme, &mut editor, idx)?;
                }
            }
            MenuAction::SaveTable => {
                if let Some(idx) = pick_table(&theme, editor.snapshot())? {
                    // Outcomes are reported by the submitter
                    submitter.submit(&editor, idx).await?;
                }
            }
            MenuAction::CheckAndSync => {
                let outcome = workflow.run().await;
                if ends_session(&mut editor, &outcome) {
                    println!(
                        "{}",
                        "The dictionary data is out of date; reload it to keep editing.".yellow()
                    );
                    break;
                }
            }
            MenuAction::Quit => break,
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// A successful sync invalidates the loaded snapshot
fn ends_session(editor: &mut DescriptionEditor, outcome: &SyncOutcome) -> bool {
    if matches!(outcome, SyncOutcome::Synced) {
        editor.mark_stale();
        true
    } else {
        false
    }
}

fn table_choices(snapshot: &DictionarySnapshot) -> Vec<String> {
    snapshot
        .tables()
        .iter()
        .map(|t| {
            if t.description.is_empty() {
                t.name.clone()
            } else {
                format!("{} ({})", t.name, t.description)
            }
        })
        .collect()
}

fn pick_table(theme: &ColorfulTheme, snapshot: &DictionarySnapshot) -> Result<Option<usize>> {
    let choices = table_choices(snapshot);
    if choices.is_empty() {
        println!("{}", "The dictionary has no tables.".yellow());
        return Ok(None);
    }
    let idx = Select::with_theme(theme)
        .with_prompt("Table")
        .items(&choices)
        .default(0)
        .interact_opt()?;
    Ok(idx)
}

/// Prompt for the table description and then each column's, current text prefilled
fn edit_table(theme: &ColorfulTheme, editor: &mut DescriptionEditor, table_idx: usize) -> Result<()> {
    let Some(table) = editor.snapshot().table(table_idx) else {
        return Ok(());
    };
    let table_name = table.name.clone();
    let current = table.description.clone();
    let columns: Vec<(String, String)> = table
        .columns()
        .iter()
        .map(|c| (c.name.clone(), c.description.clone()))
        .collect();

    let text: String = Input::with_theme(theme)
        .with_prompt(format!("Description of table {}", table_name))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    editor.set_table_description(table_idx, &text)?;

    for (col_idx, (name, current)) in columns.into_iter().enumerate() {
        let text: String = Input::with_theme(theme)
            .with_prompt(format!("{}.{}", table_name, name))
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        editor.set_column_description(table_idx, col_idx, &text)?;
    }

    println!(
        "{}",
        format!("Descriptions of {} updated locally; save the table to store them.", table_name).dimmed()
    );
    Ok(())
}
