//! Human-readable summary of a schema delta
//!
//! The summary is the text of the confirmation shown before a sync is
//! applied. Sections appear in a fixed order and empty ones are left out.

use crate::api::SchemaDelta;

pub const NEW_TABLES_HEADER: &str = "The following tables are new:";
pub const DELETED_TABLES_HEADER: &str = "The following tables were deleted:";
pub const CHANGED_COLUMNS_HEADER: &str = "The following columns have changed:";
pub const DELETED_COLUMNS_HEADER: &str = "The following columns were deleted:";
pub const NEW_COLUMNS_HEADER: &str = "The following columns are new:";
pub const SYNC_QUESTION: &str = "Do you want to sync the dictionary with these changes?";

/// Outcome of summarizing a delta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSummary {
    /// Nothing differs; there is nothing to confirm
    NoChanges,
    /// Confirmation message listing every change
    Changes(String),
}

impl ChangeSummary {
    /// The change listing alone, for output that asks nothing
    pub fn without_question(self) -> Self {
        match self {
            ChangeSummary::Changes(message) => {
                let listing = message
                    .strip_suffix(SYNC_QUESTION)
                    .map(|rest| rest.trim_end().to_string())
                    .unwrap_or(message);
                ChangeSummary::Changes(listing)
            }
            ChangeSummary::NoChanges => ChangeSummary::NoChanges,
        }
    }
}

/// Compose the confirmation message for a delta
pub fn compose_summary(delta: &SchemaDelta) -> ChangeSummary {
    if delta.is_empty() {
        return ChangeSummary::NoChanges;
    }

    let mut sections: Vec<String> = Vec::new();

    push_section(&mut sections, NEW_TABLES_HEADER, delta.new_tables.iter().cloned());
    push_section(
        &mut sections,
        DELETED_TABLES_HEADER,
        delta.deleted_tables.iter().cloned(),
    );
    push_section(
        &mut sections,
        CHANGED_COLUMNS_HEADER,
        delta.column_changes.iter().map(|change| {
            format!(
                "column ({}) in table ({}) suffered the following changes:\n{}",
                change.metadata.name, change.metadata.table_name, change.changes_message
            )
        }),
    );
    push_section(
        &mut sections,
        DELETED_COLUMNS_HEADER,
        delta
            .deleted_columns
            .iter()
            .map(|col| format!("column ({}) in table ({})", col.name, col.table)),
    );
    push_section(
        &mut sections,
        NEW_COLUMNS_HEADER,
        delta
            .new_columns
            .iter()
            .map(|col| format!("new column ({}) in table ({})", col.name, col.table)),
    );

    sections.push(SYNC_QUESTION.to_string());
    ChangeSummary::Changes(sections.join("\n\n"))
}

fn push_section(sections: &mut Vec<String>, header: &str, items: impl Iterator<Item = String>) {
    let lines: Vec<String> = items.map(|item| format!("- {}", item)).collect();
    if lines.is_empty() {
        return;
    }
    sections.push(format!("{}\n{}", header, lines.join("\n")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ChangedColumnMetadata, ColumnChange, ColumnRef};

    const ALL_HEADERS: [&str; 5] = [
        NEW_TABLES_HEADER,
        DELETED_TABLES_HEADER,
        CHANGED_COLUMNS_HEADER,
        DELETED_COLUMNS_HEADER,
        NEW_COLUMNS_HEADER,
    ];

    fn col(name: &str, table: &str) -> ColumnRef {
        ColumnRef {
            name: name.to_string(),
            table: table.to_string(),
        }
    }

    #[test]
    fn test_empty_delta_has_no_message() {
        assert_eq!(compose_summary(&SchemaDelta::default()), ChangeSummary::NoChanges);
    }

    #[test]
    fn test_only_new_tables() {
        let delta = SchemaDelta {
            new_tables: vec!["orders".to_string()],
            ..Default::default()
        };

        let ChangeSummary::Changes(message) = compose_summary(&delta) else {
            panic!("expected a message");
        };

        assert!(message.contains(NEW_TABLES_HEADER));
        assert_eq!(message.matches("- orders").count(), 1);
        for header in &ALL_HEADERS[1..] {
            assert!(!message.contains(header), "unexpected section {}", header);
        }
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let delta = SchemaDelta {
            new_tables: vec!["orders".to_string()],
            deleted_tables: vec!["legacy".to_string()],
            new_columns: vec![col("phone", "users")],
            deleted_columns: vec![col("fax", "users")],
            column_changes: vec![ColumnChange {
                metadata: ChangedColumnMetadata {
                    name: "email".to_string(),
                    table_name: "users".to_string(),
                },
                changes_message: "nullable: true -> false".to_string(),
            }],
        };

        let ChangeSummary::Changes(message) = compose_summary(&delta) else {
            panic!("expected a message");
        };

        let positions: Vec<usize> = ALL_HEADERS
            .iter()
            .map(|h| message.find(h).expect("header present"))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);

        assert!(message.contains(
            "- column (email) in table (users) suffered the following changes:\nnullable: true -> false"
        ));
        assert!(message.contains("- column (fax) in table (users)"));
        assert!(message.contains("- new column (phone) in table (users)"));
        assert!(message.ends_with(SYNC_QUESTION));
    }

    #[test]
    fn test_listing_drops_question() {
        let delta = SchemaDelta {
            new_tables: vec!["orders".to_string()],
            ..Default::default()
        };

        let ChangeSummary::Changes(listing) = compose_summary(&delta).without_question() else {
            panic!("expected a message");
        };

        assert_eq!(listing, format!("{}\n- orders", NEW_TABLES_HEADER));
        assert_eq!(
            ChangeSummary::NoChanges.without_question(),
            ChangeSummary::NoChanges
        );
    }

    #[test]
    fn test_multiple_items_one_line_each() {
        let delta = SchemaDelta {
            deleted_columns: vec![col("a", "t1"), col("b", "t2")],
            ..Default::default()
        };

        let ChangeSummary::Changes(message) = compose_summary(&delta) else {
            panic!("expected a message");
        };

        assert!(message.starts_with(&format!(
            "{}\n- column (a) in table (t1)\n- column (b) in table (t2)",
            DELETED_COLUMNS_HEADER
        )));
    }
}
