//! Storage error types

use thiserror::Error;

/// Errors raised by a row source
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store could not be opened or reached
    #[error("storage unreachable: {0}")]
    Unreachable(String),

    /// The configured table does not exist
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// A column referenced by the caller does not exist
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A read failed after the store was opened
    #[error("query error: {0}")]
    Query(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
