//! Roster Lookup Core
//!
//! Approximate "does this person exist" lookup over a mostly-static roster.
//! Designed to be embedded: no async runtime, no I/O of its own.
//!
//! # Features
//!
//! - `parallel` - Parallel index scans via rayon for large rosters
//!
//! # Example
//!
//! ```rust
//! use roster_core::{normalize, detect_name_column, Row};
//!
//! assert_eq!(normalize("أَحْمَد"), "احمد");
//!
//! let header = Row::new().with("id", 1i64).with("الاسم الكامل", "أحمد علي");
//! assert_eq!(detect_name_column(&header), Some("الاسم الكامل"));
//! ```

pub mod columns;
pub mod normalize;
pub mod row;
pub mod search;
pub mod storage;

// Re-export main types at crate root
pub use columns::{detect_name_column, detect_name_column_with};
pub use normalize::{normalize, Normalizer};
pub use row::{Row, Value};
pub use search::{
    EngineConfig, EngineError, MatchPolicy, MatchResult, SearchEngine, SearchOutcome,
    SearchStrategy, SearchableRecord,
};
pub use storage::{FilterMode, MemoryRows, NameFilter, RowSource, StoreError, StoreResult};
