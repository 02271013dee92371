//! Terminal rendering of the dictionary
//!
//! Everything here builds strings; printing is left to the caller.

use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::dictionary::{AssembledColumn, AssembledTable, DatabaseInfo, KeyKind, yes_no};

const GRID_HEADERS: [&str; 6] = ["Key", "Attribute", "Data Type", "Nullable", "Unique", "Description"];
const GAP: &str = "  ";

/// The "Database name: ..." block shown above the tables
pub fn render_database_info(info: &DatabaseInfo) -> String {
    let rows = [
        ("Database name", info.name.clone()),
        ("Database user", info.user.clone()),
        ("Database host", info.host.clone()),
        ("Database driver", info.driver.clone()),
        ("Database schema", info.schema.clone()),
        ("Database port", info.port.to_string()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{}: {}", label.bold(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per table: name, column count and description
pub fn render_table_list(tables: &[AssembledTable]) -> String {
    let name_width = tables
        .iter()
        .map(|t| t.name.width())
        .max()
        .unwrap_or(0);

    tables
        .iter()
        .enumerate()
        .map(|(idx, table)| {
            let mut line = format!(
                "{:>3}. {}  {} columns",
                idx + 1,
                pad(&table.name, name_width).bright_cyan(),
                table.columns().len()
            );
            if !table.description.is_empty() {
                line.push_str(&format!("  {}", table.description.dimmed()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table header plus its column grid
pub fn render_table(table: &AssembledTable) -> String {
    let mut out = format!("{}", table.name.bright_cyan().bold());
    if !table.description.is_empty() {
        out.push_str(&format!(" - {}", table.description));
    }
    out.push('\n');

    let rows: Vec<[String; 6]> = table.columns().iter().map(grid_row).collect();

    let mut widths: Vec<usize> = GRID_HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let header = GRID_HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w).bold().to_string())
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(header.trim_end());
    out.push('\n');

    let rule_width = widths.iter().sum::<usize>() + GAP.len() * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_width));

    for (row, column) in rows.iter().zip(table.columns()) {
        out.push('\n');
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, *w);
                match (i, column.key) {
                    (0, KeyKind::Primary) => padded.yellow().bold().to_string(),
                    (0, KeyKind::Foreign) => padded.magenta().to_string(),
                    _ => padded,
                }
            })
            .collect();
        out.push_str(cells.join(GAP).trim_end());
    }

    out
}

fn grid_row(column: &AssembledColumn) -> [String; 6] {
    let attribute = match (column.key, &column.target_table) {
        (KeyKind::Foreign, Some(target)) if !target.is_empty() => {
            format!("{} -> {}", column.name, target)
        }
        _ => column.name.clone(),
    };
    [
        column.key.label().to_string(),
        attribute,
        column.display_type.clone(),
        yes_no(column.nullable).to_string(),
        yes_no(column.is_unique).to_string(),
        column.description.clone(),
    ]
}

/// Left-align to a display width; wide characters count double
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
