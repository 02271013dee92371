//! Dictionary server API
//!
//! The endpoints the dictionary server exposes to its clients, the wire types
//! they exchange and the error taxonomy for remote calls.

pub mod client;
pub mod error;
pub mod models;

pub use client::{DictionaryApi, DictionaryClient};
pub use error::ApiError;
pub use models::{ColumnDescription, ColumnUpdatePayload, Domain, SchemaDelta, TableDomainLink};

#[cfg(test)]
pub(crate) mod testing;
