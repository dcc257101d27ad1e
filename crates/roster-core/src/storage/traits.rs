//! Row source trait definitions

use crate::row::Row;
use crate::storage::error::StoreResult;

/// How the parts of a [`NameFilter`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Every part must appear in the normalized name
    All,
    /// At least one part must appear in the normalized name
    Any,
}

/// Predicate over a normalized name: substring containment of query parts.
///
/// Kept as data (not a closure) so that backends can translate it into
/// their own query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    pub parts: Vec<String>,
    pub mode: FilterMode,
}

impl NameFilter {
    pub fn new(parts: Vec<String>, mode: FilterMode) -> Self {
        Self { parts, mode }
    }

    /// Test an already-normalized name against the filter.
    pub fn matches(&self, normalized_name: &str) -> bool {
        match self.mode {
            FilterMode::All => self.parts.iter().all(|p| normalized_name.contains(p.as_str())),
            FilterMode::Any => self.parts.iter().any(|p| normalized_name.contains(p.as_str())),
        }
    }
}

/// Read-only access to a tabular roster.
///
/// Implementations must return rows in a stable order (the table's natural
/// order) so that search ties resolve the same way on every call. Backends:
/// - [`crate::storage::MemoryRows`] for tests and small fixtures
/// - `roster_sqlite::SqliteRows` for SQLite files
pub trait RowSource: Send + Sync {
    /// Total number of rows.
    fn row_count(&self) -> StoreResult<usize>;

    /// The first row in natural order, used for column detection.
    fn first_row(&self) -> StoreResult<Option<Row>>;

    /// Every row in natural order (in-memory indexing strategy).
    fn all_rows(&self) -> StoreResult<Vec<Row>>;

    /// Rows whose normalized `name_column` satisfies `filter`, in natural
    /// order, skipping the first `offset` matches and returning at most
    /// `limit` (query-time strategy).
    fn filter_page(
        &self,
        name_column: &str,
        filter: &NameFilter,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<Row>>;

    /// First page of [`RowSource::filter_page`].
    fn filter_rows(&self, name_column: &str, filter: &NameFilter, limit: usize) -> StoreResult<Vec<Row>> {
        self.filter_page(name_column, filter, 0, limit)
    }

    /// Human-readable description for logs.
    fn describe(&self) -> String {
        "row source".to_string()
    }
}
