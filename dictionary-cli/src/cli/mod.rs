use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;

pub mod commands;

#[derive(Parser)]
#[command(name = "dictionary-cli")]
#[command(about = "Browse, describe and sync a database data dictionary")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the dictionary server
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Bootstrap document with the dictionary data (`-` reads stdin)
    #[arg(long, short = 'd', global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            server_url: self.server.clone(),
            bootstrap_path: self.data.clone(),
            assume_yes: self.yes,
            no_color: self.no_color,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the database connection details
    Info,
    /// List tables, or show the column grid of one table
    Tables {
        /// Table name
        table: Option<String>,
    },
    /// Ask the server for schema changes without applying them
    Check,
    /// Check for schema changes and apply them after confirmation
    Sync,
    /// Save descriptions of one table
    Save {
        /// Table name or id
        table: String,
        #[arg(long, value_name = "TEXT")]
        table_description: Option<String>,
        /// Column description as NAME=TEXT (repeatable)
        #[arg(long = "column", short = 'c', value_name = "NAME=TEXT", value_parser = commands::dictionary::parse_column_edit)]
        columns: Vec<(String, String)>,
        /// Column description addressed by column id as ID=TEXT (repeatable)
        #[arg(long = "column-id", value_name = "ID=TEXT", value_parser = commands::dictionary::parse_column_edit)]
        column_ids: Vec<(String, String)>,
    },
    /// Manage business domains
    #[command(subcommand)]
    Domains(DomainCommands),
    /// Interactive session: view, edit, save and sync
    Session,
}

#[derive(Subcommand)]
pub enum DomainCommands {
    List,
    Create {
        name: String,
        description: String,
    },
    /// Link a table to a domain
    Link {
        /// Table id or name
        table: String,
        domain: String,
    },
}
