//! Wire types exchanged with the dictionary server

use serde::{Deserialize, Serialize};

use crate::dictionary::models::null_as_empty;

/// A column reported by the server in a schema delta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
    pub table: String,
}

/// Stored metadata identifying a column that changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedColumnMetadata {
    pub name: String,
    pub table_name: String,
}

/// A column whose definition differs from the live database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChange {
    pub metadata: ChangedColumnMetadata,
    /// Free-text description of what changed, already formatted by the server
    pub changes_message: String,
}

/// Structural difference between the stored dictionary and the live schema
///
/// Computed by the server; the client only reads it. Any list may be empty or
/// `null` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDelta {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub new_tables: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deleted_tables: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub new_columns: Vec<ColumnRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deleted_columns: Vec<ColumnRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub column_changes: Vec<ColumnChange>,
}

impl SchemaDelta {
    /// True when the stored dictionary matches the live schema
    pub fn is_empty(&self) -> bool {
        self.new_tables.is_empty()
            && self.deleted_tables.is_empty()
            && self.new_columns.is_empty()
            && self.deleted_columns.is_empty()
            && self.column_changes.is_empty()
    }
}

/// Description of one column in an update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub col_id: String,
    pub description: String,
}

/// Body of `POST /update`: every description of a single table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnUpdatePayload {
    pub table_id: String,
    pub table_description: String,
    pub columns_data: Vec<ColumnDescription>,
}

/// A business domain tables can be grouped under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /link-table-with-domain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDomainLink {
    pub table_id: String,
    pub domain_name: String,
}
