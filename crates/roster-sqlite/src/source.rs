//! SQLite-backed row source implementing RowSource

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Params, Statement};
use tracing::{debug, info};

use roster_core::normalize::Normalizer;
use roster_core::row::{Row, Value};
use roster_core::storage::{FilterMode, NameFilter, RowSource, StoreError, StoreResult};

use crate::table::{quote_ident, resolve_table};

/// Name of the scalar SQL function that applies the roster normalizer.
pub const NORMALIZE_FN: &str = "roster_normalize";

/// Read-only SQLite roster
///
/// Rows are returned in `rowid` order. The connection is guarded by a mutex
/// so the source can be shared across search workers.
pub struct SqliteRows {
    conn: Mutex<Connection>,
    table: String,
    location: String,
}

impl SqliteRows {
    /// Open a database file read-only.
    ///
    /// `table` may be a table name or the spreadsheet sheet name it was
    /// imported from; `None` selects the first table.
    pub fn open(
        path: impl AsRef<Path>,
        table: Option<&str>,
        normalizer: Normalizer,
    ) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::Unreachable(format!(
                "database file not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| StoreError::Unreachable(format!("{}: {}", path.display(), e)))?;

        Self::from_connection(conn, table, normalizer, path.display().to_string())
    }

    /// Wrap an existing connection (for testing with in-memory databases).
    pub fn from_connection(
        conn: Connection,
        table: Option<&str>,
        normalizer: Normalizer,
        location: impl Into<String>,
    ) -> StoreResult<Self> {
        let table = resolve_table(&conn, table)?;
        register_normalizer(&conn, normalizer)
            .map_err(|e| StoreError::Unreachable(format!("registering {NORMALIZE_FN}: {e}")))?;

        let location = location.into();
        info!(location = %location, table = %table, "Opened SQLite roster");

        Ok(Self {
            conn: Mutex::new(conn),
            table,
            location,
        })
    }

    /// The resolved table name
    pub fn table(&self) -> &str {
        &self.table
    }

    fn select_all(&self, tail: &str) -> String {
        format!("SELECT * FROM {} {}", quote_ident(&self.table), tail)
    }
}

impl RowSource for SqliteRows {
    fn row_count(&self) -> StoreResult<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", quote_ident(&self.table)),
                [],
                |row| row.get(0),
            )
            .map_err(query_error)?;
        Ok(count.max(0) as usize)
    }

    fn first_row(&self) -> StoreResult<Option<Row>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&self.select_all("ORDER BY rowid LIMIT 1"))
            .map_err(query_error)?;
        Ok(read_rows(&mut stmt, [])?.into_iter().next())
    }

    fn all_rows(&self) -> StoreResult<Vec<Row>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&self.select_all("ORDER BY rowid"))
            .map_err(query_error)?;
        read_rows(&mut stmt, [])
    }

    fn filter_page(
        &self,
        name_column: &str,
        filter: &NameFilter,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<Row>> {
        let sql = self.select_all(&format!(
            "WHERE {} ORDER BY rowid LIMIT {} OFFSET {}",
            where_clause(name_column, filter),
            limit,
            offset
        ));
        debug!(sql = %sql, parts = filter.parts.len(), "Filtering roster");

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(_, Some(ref msg)) if msg.contains("no such column") => {
                StoreError::ColumnNotFound(name_column.to_string())
            }
            other => query_error(other),
        })?;
        read_rows(&mut stmt, rusqlite::params_from_iter(filter.parts.iter()))
    }

    fn describe(&self) -> String {
        format!("sqlite {} [{}]", self.location, self.table)
    }
}

/// Build the WHERE predicate for `filter`; part `n` binds to `?n`.
fn where_clause(name_column: &str, filter: &NameFilter) -> String {
    if filter.parts.is_empty() {
        return match filter.mode {
            FilterMode::All => "1".to_string(),
            FilterMode::Any => "0".to_string(),
        };
    }

    let column = quote_ident(name_column);
    let joiner = match filter.mode {
        FilterMode::All => " AND ",
        FilterMode::Any => " OR ",
    };

    (1..=filter.parts.len())
        .map(|i| format!("instr({NORMALIZE_FN}({column}), ?{i}) > 0"))
        .collect::<Vec<_>>()
        .join(joiner)
}

fn register_normalizer(conn: &Connection, normalizer: Normalizer) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        NORMALIZE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        move |ctx| {
            let text = to_value(ctx.get_raw(0)).as_text();
            Ok(text.map(|t| normalizer.normalize(&t)))
        },
    )
}

fn read_rows<P: Params>(stmt: &mut Statement<'_>, params: P) -> StoreResult<Vec<Row>> {
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query(params).map_err(query_error)?;
    let mut out = Vec::new();

    while let Some(r) = rows.next().map_err(query_error)? {
        let mut row = Row::new();
        for (idx, name) in columns.iter().enumerate() {
            let value = r.get_ref(idx).map_err(query_error)?;
            row.push(name.clone(), to_value(value));
        }
        out.push(row);
    }

    Ok(out)
}

fn to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

fn query_error(e: rusqlite::Error) -> StoreError {
    StoreError::Query(format!("SQLite: {}", e))
}
