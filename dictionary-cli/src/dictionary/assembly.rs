//! Assembly of the flat table and column lists into a nested snapshot

use std::collections::HashMap;

use super::format::{KeyKind, format_db_type};
use super::models::{Bootstrap, Column, DatabaseInfo, Table};
use super::ordering::order_columns;

/// A column after ordering and type formatting
#[derive(Debug, Clone)]
pub struct AssembledColumn {
    pub id: String,
    pub name: String,
    pub table_name: String,
    /// Display type (e.g. "VARCHAR(255)", "ENUM(A,B)")
    pub display_type: String,
    pub key: KeyKind,
    pub nullable: bool,
    pub is_unique: bool,
    pub target_table: Option<String>,
    pub description: String,
}

impl AssembledColumn {
    fn from_column(column: Column) -> Self {
        Self {
            display_type: format_db_type(&column),
            key: KeyKind::of(&column),
            id: column.id,
            name: column.name,
            table_name: column.table_name,
            nullable: column.nullable,
            is_unique: column.is_unique,
            target_table: column.target_table_fk,
            description: column.description.unwrap_or_default(),
        }
    }
}

/// A table with its columns in display order
#[derive(Debug, Clone)]
pub struct AssembledTable {
    pub id: String,
    pub name: String,
    pub description: String,
    pub(super) columns: Vec<AssembledColumn>,
}

impl AssembledTable {
    /// Columns in their frozen display order
    pub fn columns(&self) -> &[AssembledColumn] {
        &self.columns
    }
}

/// The in-memory, editable view of the dictionary
///
/// Column order is fixed at assembly; nothing outside this module can reorder
/// it, so positions handed out once stay valid for the life of the snapshot.
#[derive(Debug, Clone)]
pub struct DictionarySnapshot {
    pub database: DatabaseInfo,
    pub(super) tables: Vec<AssembledTable>,
    pub(super) stale: bool,
}

impl DictionarySnapshot {
    pub fn tables(&self) -> &[AssembledTable] {
        &self.tables
    }

    pub fn table(&self, idx: usize) -> Option<&AssembledTable> {
        self.tables.get(idx)
    }

    pub fn table_index(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// True once a schema sync has been applied and the data must be reloaded
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

/// Build a snapshot from the raw table and column lists
///
/// Columns are joined to tables by exact, case-sensitive name match. Columns
/// whose table is unknown are dropped.
pub fn assemble(database: DatabaseInfo, tables: &[Table], columns: &[Column]) -> DictionarySnapshot {
    let mut by_table: HashMap<&str, Vec<Column>> = HashMap::new();
    for column in columns {
        by_table
            .entry(column.table_name.as_str())
            .or_default()
            .push(column.clone());
    }

    let assembled: Vec<AssembledTable> = tables
        .iter()
        .map(|table| {
            let raw = by_table
                .get(table.name.as_str())
                .cloned()
                .unwrap_or_default();
            AssembledTable {
                id: table.id.clone(),
                name: table.name.clone(),
                description: table.description.clone().unwrap_or_default(),
                columns: order_columns(raw)
                    .into_iter()
                    .map(AssembledColumn::from_column)
                    .collect(),
            }
        })
        .collect();

    let orphaned: Vec<&str> = by_table
        .keys()
        .copied()
        .filter(|name| !tables.iter().any(|t| t.name == *name))
        .collect();
    if !orphaned.is_empty() {
        log::debug!(
            "Dropped columns belonging to unknown tables: {:?}",
            orphaned
        );
    }

    let snapshot = DictionarySnapshot {
        database,
        tables: assembled,
        stale: false,
    };
    log::info!(
        "Assembled dictionary with {} tables and {} columns",
        snapshot.tables.len(),
        snapshot.column_count()
    );
    snapshot
}

impl From<&Bootstrap> for DictionarySnapshot {
    fn from(bootstrap: &Bootstrap) -> Self {
        assemble(
            bootstrap.database_info.clone(),
            &bootstrap.tables,
            &bootstrap.columns,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(id: &str, name: &str) -> Table {
        Table {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
        }
    }

    fn make_col(id: &str, table: &str, name: &str) -> Column {
        Column {
            id: id.to_string(),
            name: name.to_string(),
            table_name: table.to_string(),
            db_type: "INT".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_primary_key_table() {
        let tables = vec![make_table("1", "users")];
        let mut id_col = make_col("c1", "users", "id");
        id_col.is_primary_key = true;

        let snapshot = assemble(DatabaseInfo::default(), &tables, &[id_col]);

        assert_eq!(snapshot.tables().len(), 1);
        let columns = snapshot.tables()[0].columns();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].key, KeyKind::Primary);
    }

    #[test]
    fn test_bootstrap_document_to_snapshot() {
        let raw = r#"{
            "DatabaseInfo": {"name": "shop"},
            "Tables": [{"name": "users", "id": 1}],
            "Columns": [{"table_name": "users", "name": "id", "id": 1, "db_type": "INT", "is_primary_key": true}]
        }"#;

        let bootstrap = Bootstrap::from_json(raw).unwrap();
        let snapshot = DictionarySnapshot::from(&bootstrap);

        assert_eq!(snapshot.tables().len(), 1);
        assert_eq!(snapshot.tables()[0].id, "1");
        let columns = snapshot.tables()[0].columns();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].key, KeyKind::Primary);
    }

    #[test]
    fn test_orphan_columns_are_dropped() {
        let tables = vec![make_table("1", "users"), make_table("2", "orders")];
        let columns = vec![
            make_col("c1", "users", "id"),
            make_col("c2", "orders", "id"),
            make_col("c3", "invoices", "id"),
            make_col("c4", "Users", "email"),
        ];

        let snapshot = assemble(DatabaseInfo::default(), &tables, &columns);

        assert_eq!(snapshot.column_count(), 2);
        assert!(snapshot.column_count() <= columns.len());
        assert!(
            snapshot
                .tables()
                .iter()
                .flat_map(|t| t.columns())
                .all(|c| c.id != "c3" && c.id != "c4")
        );
    }

    #[test]
    fn test_columns_ordered_and_formatted_per_table() {
        let tables = vec![make_table("1", "orders")];
        let mut note = make_col("c1", "orders", "note");
        note.db_type = "varchar".to_string();
        note.length = Some(80);
        let mut user_id = make_col("c2", "orders", "user_id");
        user_id.is_foreign_key = true;
        user_id.target_table_fk = Some("users".to_string());
        let mut id = make_col("c3", "orders", "id");
        id.is_primary_key = true;

        let snapshot = assemble(DatabaseInfo::default(), &tables, &[note, user_id, id]);

        let columns = snapshot.tables()[0].columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "user_id", "note"]);
        assert_eq!(columns[1].target_table.as_deref(), Some("users"));
        assert_eq!(columns[2].display_type, "varchar(80)");
    }

    #[test]
    fn test_table_without_columns() {
        let tables = vec![make_table("1", "empty")];

        let snapshot = assemble(DatabaseInfo::default(), &tables, &[]);

        assert!(snapshot.tables()[0].columns().is_empty());
        assert_eq!(snapshot.table_index("empty"), Some(0));
        assert!(!snapshot.is_stale());
    }

    #[test]
    fn test_from_bootstrap() {
        let bootstrap = Bootstrap {
            database_info: DatabaseInfo {
                name: "shop".to_string(),
                ..Default::default()
            },
            tables: vec![make_table("1", "users")],
            columns: vec![make_col("c1", "users", "id")],
        };

        let snapshot = DictionarySnapshot::from(&bootstrap);

        assert_eq!(snapshot.database.name, "shop");
        assert_eq!(snapshot.column_count(), 1);
    }
}
