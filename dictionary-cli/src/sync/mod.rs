//! Schema reconciliation
//!
//! Business logic for bringing the stored dictionary back in line with the
//! live database:
//! - Summarizing the server-computed schema delta for confirmation
//! - The detect → confirm → apply workflow
//! - The progress indicator shown while a sync is applied
//! - Sequencing of overlapping runs

pub mod progress;
pub mod sequence;
pub mod summary;
pub mod workflow;

pub use progress::TerminalProgress;
pub use summary::ChangeSummary;
pub use workflow::{SyncOutcome, SyncWorkflow};
