//! In-memory description edits
//!
//! Edits are addressed either by position in the assembled snapshot or by the
//! stable ids the server assigns. Nothing is sent anywhere until the table is
//! explicitly saved.

use std::collections::HashMap;

use super::assembly::{AssembledTable, DictionarySnapshot};
use crate::api::{ColumnDescription, ColumnUpdatePayload};

/// Error when an edit cannot be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Table position is out of range
    NoSuchTable { idx: usize },
    /// Column position is out of range for the table
    NoSuchColumn { table_idx: usize, col_idx: usize },
    /// No table or column carries the given id or name
    UnknownKey(String),
    /// A schema sync was applied; the dictionary has to be reloaded first
    StaleSnapshot,
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::NoSuchTable { idx } => write!(f, "no table at position {}", idx),
            EditError::NoSuchColumn { table_idx, col_idx } => {
                write!(f, "table {} has no column at position {}", table_idx, col_idx)
            }
            EditError::UnknownKey(key) => write!(f, "no table or column named '{}'", key),
            EditError::StaleSnapshot => write!(
                f,
                "the dictionary was synced with the database and must be reloaded before editing"
            ),
        }
    }
}

impl std::error::Error for EditError {}

/// Holds the editable snapshot for one loaded dictionary
#[derive(Debug)]
pub struct DescriptionEditor {
    snapshot: DictionarySnapshot,
    table_ids: HashMap<String, usize>,
    column_ids: HashMap<String, (usize, usize)>,
}

impl DescriptionEditor {
    pub fn new(snapshot: DictionarySnapshot) -> Self {
        let mut table_ids = HashMap::new();
        let mut column_ids = HashMap::new();
        for (table_idx, table) in snapshot.tables.iter().enumerate() {
            table_ids.insert(table.id.clone(), table_idx);
            for (col_idx, column) in table.columns.iter().enumerate() {
                column_ids.insert(column.id.clone(), (table_idx, col_idx));
            }
        }

        Self {
            snapshot,
            table_ids,
            column_ids,
        }
    }

    pub fn snapshot(&self) -> &DictionarySnapshot {
        &self.snapshot
    }

    /// Mark the snapshot as out of date after a schema sync
    pub fn mark_stale(&mut self) {
        log::debug!("Dictionary snapshot marked stale");
        self.snapshot.stale = true;
    }

    pub fn set_table_description(&mut self, table_idx: usize, text: &str) -> Result<(), EditError> {
        let table = self.table_mut(table_idx)?;
        table.description = text.to_string();
        log::debug!("Edited description of table '{}'", table.name);
        Ok(())
    }

    pub fn set_column_description(
        &mut self,
        table_idx: usize,
        col_idx: usize,
        text: &str,
    ) -> Result<(), EditError> {
        let table = self.table_mut(table_idx)?;
        let column = table
            .columns
            .get_mut(col_idx)
            .ok_or(EditError::NoSuchColumn { table_idx, col_idx })?;
        column.description = text.to_string();
        log::debug!(
            "Edited description of column '{}.{}'",
            column.table_name,
            column.name
        );
        Ok(())
    }

    pub fn set_column_description_by_id(&mut self, col_id: &str, text: &str) -> Result<(), EditError> {
        let (table_idx, col_idx) = self.column_position_by_id(col_id)?;
        self.set_column_description(table_idx, col_idx, text)
    }

    /// Resolve a column id to its (table, column) position
    pub fn column_position_by_id(&self, col_id: &str) -> Result<(usize, usize), EditError> {
        self.column_ids
            .get(col_id)
            .copied()
            .ok_or_else(|| EditError::UnknownKey(col_id.to_string()))
    }

    /// Resolve a column by table and column name
    pub fn column_position(&self, table_idx: usize, name: &str) -> Result<usize, EditError> {
        let table = self
            .snapshot
            .table(table_idx)
            .ok_or(EditError::NoSuchTable { idx: table_idx })?;
        table
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| EditError::UnknownKey(format!("{}.{}", table.name, name)))
    }

    /// Resolve a table by name, falling back to its id
    pub fn table_position(&self, key: &str) -> Result<usize, EditError> {
        self.snapshot
            .table_index(key)
            .or_else(|| self.table_ids.get(key).copied())
            .ok_or_else(|| EditError::UnknownKey(key.to_string()))
    }

    /// Build the update request for one table from its current descriptions
    pub fn payload_for(&self, table_idx: usize) -> Result<ColumnUpdatePayload, EditError> {
        let table = self
            .snapshot
            .table(table_idx)
            .ok_or(EditError::NoSuchTable { idx: table_idx })?;

        Ok(ColumnUpdatePayload {
            table_id: table.id.clone(),
            table_description: table.description.clone(),
            columns_data: table
                .columns
                .iter()
                .map(|c| ColumnDescription {
                    col_id: c.id.clone(),
                    description: c.description.clone(),
                })
                .collect(),
        })
    }

    fn table_mut(&mut self, idx: usize) -> Result<&mut AssembledTable, EditError> {
        if self.snapshot.stale {
            return Err(EditError::StaleSnapshot);
        }
        self.snapshot
            .tables
            .get_mut(idx)
            .ok_or(EditError::NoSuchTable { idx })
    }
}
