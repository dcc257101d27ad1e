//! Storage abstraction for rosters
//!
//! The search engine only ever reads: it asks for a sample row, then either
//! all rows (to build an in-memory index) or a filtered subset on every query.
//!
//! - **Memory**: [`MemoryRows`], for tests and embedding
//! - **SQLite**: `roster-sqlite` crate, native only

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryRows;
pub use traits::{FilterMode, NameFilter, RowSource};
