//! Detect → confirm → apply workflow for schema reconciliation
//!
//! ```text
//! Idle → Checking → NoChanges → Idle
//!                 → AwaitingConfirmation → Idle            (declined)
//!                                        → Syncing → Idle  (synced)
//!                                                  → Error → Idle
//! ```
//!
//! Every failure is handled here: it is reported through the prompter and the
//! workflow returns to `Idle`, ready to be triggered again.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::progress::{ProgressGuard, ProgressSink};
use super::sequence::RequestSequence;
use super::summary::{ChangeSummary, compose_summary};
use crate::api::{ApiError, DictionaryApi};
use crate::prompt::{Notice, Prompter};

pub const NO_CHANGES_NOTICE: &str = "There are no changes in the database schema.";
pub const SYNCED_NOTICE: &str =
    "The dictionary was synced with the database. Reload it to see the changes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Checking,
    NoChanges,
    AwaitingConfirmation,
    Syncing,
    Error,
}

/// How one run of the workflow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The stored dictionary already matches the database
    NoChanges,
    /// The user said no; nothing was changed on the server
    Declined,
    /// The server applied the sync; any loaded snapshot is now stale
    Synced,
    Failed(ApiError),
    /// A newer run was started before this one's check answered
    Superseded,
}

pub struct SyncWorkflow {
    api: Arc<dyn DictionaryApi>,
    prompter: Arc<dyn Prompter>,
    progress: Arc<dyn ProgressSink>,
    progress_interval: Duration,
    sequence: RequestSequence,
    state: Mutex<SyncState>,
    transitions: Mutex<Vec<SyncState>>,
}

impl std::fmt::Debug for SyncWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncWorkflow")
            .field("state", &self.state())
            .field("progress_interval", &self.progress_interval)
            .finish()
    }
}

impl SyncWorkflow {
    pub fn new(
        api: Arc<dyn DictionaryApi>,
        prompter: Arc<dyn Prompter>,
        progress: Arc<dyn ProgressSink>,
        progress_interval: Duration,
    ) -> Self {
        Self {
            api,
            prompter,
            progress,
            progress_interval,
            sequence: RequestSequence::new(),
            state: Mutex::new(SyncState::Idle),
            transitions: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> SyncState {
        *lock(&self.state)
    }

    /// States entered during the most recent run, in order
    #[cfg(test)]
    pub fn transitions(&self) -> Vec<SyncState> {
        lock(&self.transitions).clone()
    }

    /// Check for schema changes and, if the user agrees, apply them
    pub async fn run(&self) -> SyncOutcome {
        let ticket = self.sequence.next();
        lock(&self.transitions).clear();
        self.enter(SyncState::Checking);
        log::info!("Checking database for schema changes (request {})", ticket.value());

        let result = self.api.check_changes().await;

        if !self.sequence.is_latest(ticket) {
            log::debug!(
                "Discarding schema check response for superseded request {}",
                ticket.value()
            );
            return SyncOutcome::Superseded;
        }

        let delta = match result {
            Ok(delta) => delta,
            Err(err) => return self.fail(err),
        };

        let message = match compose_summary(&delta) {
            ChangeSummary::NoChanges => {
                self.enter(SyncState::NoChanges);
                log::info!("No schema changes detected");
                self.prompter.notify(Notice::Info(NO_CHANGES_NOTICE.to_string()));
                self.enter(SyncState::Idle);
                return SyncOutcome::NoChanges;
            }
            ChangeSummary::Changes(message) => message,
        };

        self.enter(SyncState::AwaitingConfirmation);
        if !self.prompter.confirm(&message) {
            log::info!("Schema sync declined");
            self.enter(SyncState::Idle);
            return SyncOutcome::Declined;
        }

        self.enter(SyncState::Syncing);
        let indicator = ProgressGuard::start(Arc::clone(&self.progress), self.progress_interval);
        let result = self.api.sync_database().await;
        indicator.stop();

        // The sync answer is reported even when superseded: the server has
        // already applied it.
        match result {
            Ok(()) => {
                log::info!("Schema sync applied");
                self.enter(SyncState::Idle);
                self.prompter.notify(Notice::Success(SYNCED_NOTICE.to_string()));
                SyncOutcome::Synced
            }
            Err(err) => self.fail(err),
        }
    }

    /// Fetch and list the current delta without offering to apply it
    pub async fn preview(&self) -> Result<ChangeSummary, ApiError> {
        self.enter(SyncState::Checking);
        let result = self.api.check_changes().await;
        self.enter(SyncState::Idle);
        result.map(|delta| compose_summary(&delta).without_question())
    }

    fn fail(&self, err: ApiError) -> SyncOutcome {
        self.enter(SyncState::Error);
        log::error!("Schema sync failed: {}", err);
        self.prompter.notify(Notice::Failure(err.user_message()));
        self.enter(SyncState::Idle);
        SyncOutcome::Failed(err)
    }

    fn enter(&self, next: SyncState) {
        let mut state = lock(&self.state);
        log::debug!("Sync workflow: {:?} -> {:?}", *state, next);
        *state = next;
        lock(&self.transitions).push(next);
    }
}

/// Lock ignoring poisoning; the guarded values stay consistent on panic
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
