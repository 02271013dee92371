//! Data dictionary models
//!
//! Raw shapes handed to the client at load time. The bootstrap document keeps
//! the key casing the dictionary server uses for its page data
//! (`DatabaseInfo`, `Tables`, `Columns`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Connection metadata of the documented database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub port: u16,
}

/// A table as stored in the dictionary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Column metadata as stored in the dictionary
///
/// `table_name` is a lookup key into the table list, not an ownership link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub table_name: String,
    pub db_type: String,
    /// Only meaningful for variable-length types (e.g. VARCHAR)
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default)]
    pub has_enum: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enum_values: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,

    // Extra metadata the server records for keys, enums and unique indexes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_table_fk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_index_definition: Option<String>,
}

/// Everything the client needs before the first render
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bootstrap {
    #[serde(rename = "DatabaseInfo", default)]
    pub database_info: DatabaseInfo,
    #[serde(rename = "Tables", default, deserialize_with = "null_as_empty")]
    pub tables: Vec<Table>,
    #[serde(rename = "Columns", default, deserialize_with = "null_as_empty")]
    pub columns: Vec<Column>,
}

impl Bootstrap {
    /// Parse a bootstrap document from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse dictionary bootstrap data")
    }

    /// Load the bootstrap document from a file, or from stdin when the path is `-`
    pub fn load(path: &Path) -> Result<Self> {
        let raw = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read bootstrap data from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read bootstrap file: {}", path.display()))?
        };

        let bootstrap = Self::from_json(&raw)?;
        log::debug!(
            "Loaded bootstrap for database '{}': {} tables, {} columns",
            bootstrap.database_info.name,
            bootstrap.tables.len(),
            bootstrap.columns.len()
        );
        Ok(bootstrap)
    }
}

/// Treat an explicit JSON `null` list the same as a missing one
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// Ids arrive as strings or as plain numbers depending on the server build
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
