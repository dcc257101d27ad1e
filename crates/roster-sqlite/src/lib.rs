//! SQLite row source for roster lookup
//!
//! Rosters are usually spreadsheets converted into SQLite, one table per
//! sheet. This crate exposes such a table as a read-only
//! [`roster_core::storage::RowSource`].
//!
//! # Features
//!
//! - Opens databases read-only; the lookup service never writes
//! - Accepts either the table name or the original sheet name
//! - Registers the roster normalizer as the `roster_normalize(text)` SQL
//!   function so query-time filtering sees the same canonical form as the
//!   in-memory index
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roster_core::{EngineConfig, Normalizer, SearchEngine};
//! use roster_sqlite::SqliteRows;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = SqliteRows::open("data.db", Some("Sheet1"), Normalizer::new())?;
//! let engine = SearchEngine::initialize(Arc::new(rows), EngineConfig::default())?;
//! let outcome = engine.search("أحمد", 10)?;
//! # Ok(())
//! # }
//! ```

pub mod source;
pub mod table;

// Re-export main types
pub use source::{SqliteRows, NORMALIZE_FN};
pub use table::{quote_ident, resolve_table, sheet_table_name};
