//! Presentation order for the columns of one table
//!
//! The primary key goes first, foreign keys follow in the order they were
//! supplied, and every other column keeps its supplied relative order.

use super::models::Column;

const RANK_PRIMARY: u8 = 0;
const RANK_FOREIGN: u8 = 1;
const RANK_OTHER: u8 = 2;

/// Order the columns of a single table for display
///
/// This is a stable partition by rank, so running it on the same input always
/// yields the same output. If several columns claim to be the primary key the
/// last one scanned is treated as the key and the others fall back to the
/// "other" rank.
pub fn order_columns(columns: Vec<Column>) -> Vec<Column> {
    let mut primary_idx = None;
    let mut primary_count = 0usize;
    for (idx, column) in columns.iter().enumerate() {
        if column.is_primary_key {
            primary_idx = Some(idx);
            primary_count += 1;
        }
    }

    if primary_count > 1 {
        if let Some(table) = columns.first().map(|c| c.table_name.as_str()) {
            log::warn!(
                "Table '{}' has {} primary key columns, only the last one is ordered first",
                table,
                primary_count
            );
        }
    }

    let mut ranked: Vec<(u8, Column)> = columns
        .into_iter()
        .enumerate()
        .map(|(idx, column)| {
            let rank = if Some(idx) == primary_idx {
                RANK_PRIMARY
            } else if !column.is_primary_key && column.is_foreign_key {
                RANK_FOREIGN
            } else {
                RANK_OTHER
            };
            (rank, column)
        })
        .collect();

    // sort_by_key is stable: ties keep their input order
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, column)| column).collect()
}
