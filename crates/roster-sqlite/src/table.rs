//! Table resolution and identifier quoting

use rusqlite::Connection;

use roster_core::storage::{StoreError, StoreResult};

/// Map a spreadsheet sheet name to the table name the importer created:
/// surrounding whitespace trimmed, inner spaces replaced by underscores.
pub fn sheet_table_name(sheet: &str) -> String {
    sheet.trim().replace(' ', "_")
}

/// Quote an identifier for interpolation into SQL.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// User tables in creation order.
pub fn list_tables(conn: &Connection) -> StoreResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY rowid",
        )
        .map_err(|e| StoreError::Unreachable(e.to_string()))?;

    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| StoreError::Unreachable(e.to_string()))?
        .collect::<Result<Vec<String>, rusqlite::Error>>()
        .map_err(|e| StoreError::Unreachable(e.to_string()))?;

    Ok(tables)
}

/// Resolve the table to read.
///
/// A requested name is tried verbatim first, then in its sheet-derived form.
/// Without a request the first user table is used.
pub fn resolve_table(conn: &Connection, requested: Option<&str>) -> StoreResult<String> {
    let tables = list_tables(conn)?;

    match requested {
        Some(name) => {
            let derived = sheet_table_name(name);
            tables
                .iter()
                .find(|t| t.as_str() == name)
                .or_else(|| tables.iter().find(|t| **t == derived))
                .cloned()
                .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
        }
        None => tables
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::TableNotFound("<no tables in database>".to_string())),
    }
}
