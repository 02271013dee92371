//! Command handlers

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::{DictionaryApi, DictionaryClient};
use crate::config::ClientConfig;
use crate::dictionary::{Bootstrap, DictionarySnapshot};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::sync::{SyncWorkflow, TerminalProgress};

pub mod dictionary;
pub mod domains;
pub mod session;
pub mod sync;

/// Shared dependencies of every command
pub struct CommandContext {
    pub config: ClientConfig,
    pub api: Arc<dyn DictionaryApi>,
    pub prompter: Arc<dyn Prompter>,
}

impl CommandContext {
    /// Wire the terminal prompter and the HTTP client from configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let client = DictionaryClient::new(&config).context("Failed to build HTTP client")?;
        log::debug!("Using dictionary server at {}", client.base_url());
        Ok(Self {
            prompter: Arc::new(TerminalPrompter::new(config.assume_yes)),
            api: Arc::new(client),
            config,
        })
    }

    /// Read and assemble the bootstrap document
    pub fn load_snapshot(&self) -> Result<DictionarySnapshot> {
        let Some(path) = &self.config.bootstrap_path else {
            anyhow::bail!(
                "No dictionary data given. Use --data <PATH> or set DICTIONARY_BOOTSTRAP."
            );
        };
        let bootstrap = Bootstrap::load(path)?;
        Ok(DictionarySnapshot::from(&bootstrap))
    }

    pub fn sync_workflow(&self) -> SyncWorkflow {
        SyncWorkflow::new(
            Arc::clone(&self.api),
            Arc::clone(&self.prompter),
            Arc::new(TerminalProgress),
            self.config.progress_interval,
        )
    }
}
