//! In-memory row source
//!
//! A Vec-backed implementation for tests, fixtures and embedding callers that
//! already hold their roster in memory.

use crate::normalize::Normalizer;
use crate::row::{Row, Value};
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::traits::{NameFilter, RowSource};

/// In-memory roster.
#[derive(Debug, Default, Clone)]
pub struct MemoryRows {
    rows: Vec<Row>,
    normalizer: Normalizer,
}

impl MemoryRows {
    /// Create a source over `rows`, filtering with the default policy.
    pub fn new(rows: Vec<Row>) -> Self {
        Self::with_normalizer(rows, Normalizer::new())
    }

    /// Create a source that normalizes names with `normalizer` when filtering.
    pub fn with_normalizer(rows: Vec<Row>, normalizer: Normalizer) -> Self {
        Self { rows, normalizer }
    }

    /// Convenience constructor for single-column rosters.
    pub fn from_names<I, S>(column: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = names
            .into_iter()
            .map(|name| Row::new().with(column, Value::Text(name.into())))
            .collect();
        Self::new(rows)
    }

    /// Get a reference to all rows (for testing).
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl RowSource for MemoryRows {
    fn row_count(&self) -> StoreResult<usize> {
        Ok(self.rows.len())
    }

    fn first_row(&self) -> StoreResult<Option<Row>> {
        Ok(self.rows.first().cloned())
    }

    fn all_rows(&self) -> StoreResult<Vec<Row>> {
        Ok(self.rows.clone())
    }

    fn filter_page(
        &self,
        name_column: &str,
        filter: &NameFilter,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<Row>> {
        if let Some(first) = self.rows.first() {
            if first.get(name_column).is_none() {
                return Err(StoreError::ColumnNotFound(name_column.to_string()));
            }
        }

        Ok(self
            .rows
            .iter()
            .filter(|row| {
                row.get(name_column)
                    .and_then(|v| v.as_text())
                    .map(|name| filter.matches(&self.normalizer.normalize(&name)))
                    .unwrap_or(false)
            })
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}
