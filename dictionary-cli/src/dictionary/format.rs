//! Display formatting for column metadata

use super::models::Column;

/// Key marker shown in the first column of a table grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Primary,
    Foreign,
    None,
}

impl KeyKind {
    pub fn of(column: &Column) -> Self {
        if column.is_primary_key {
            KeyKind::Primary
        } else if column.is_foreign_key {
            KeyKind::Foreign
        } else {
            KeyKind::None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KeyKind::Primary => "PK",
            KeyKind::Foreign => "FK",
            KeyKind::None => "",
        }
    }
}

/// Format the database type of a column for display
///
/// Enumerations win over everything else and render their values, VARCHAR
/// carries its length, any other type is shown as stored. A VARCHAR without a
/// length keeps its empty parentheses so the gap in the metadata stays visible.
pub fn format_db_type(column: &Column) -> String {
    if column.has_enum {
        return format!("ENUM({})", column.enum_values.join(","));
    }

    if column.db_type.eq_ignore_ascii_case("VARCHAR") {
        let length = column.length.map(|l| l.to_string()).unwrap_or_default();
        return format!("{}({})", column.db_type, length);
    }

    column.db_type.clone()
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "NO" }
}
