//! Data dictionary view model
//!
//! Loading, ordering, formatting and editing of the table/column metadata
//! the dictionary server hands out. Everything in here is synchronous and
//! free of I/O apart from reading the bootstrap document.

pub mod assembly;
pub mod editor;
pub mod format;
pub mod models;
pub mod ordering;

pub use assembly::{AssembledColumn, AssembledTable, DictionarySnapshot};
pub use editor::{DescriptionEditor, EditError};
pub use format::{KeyKind, yes_no};
pub use models::{Bootstrap, DatabaseInfo};
