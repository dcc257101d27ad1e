//! Ranked name search
//!
//! # Algorithm
//!
//! 1. Normalize the query; an empty result yields no matches
//! 2. Split into parts, dropping parts shorter than two characters
//! 3. Retrieve up to `max(limit, 10) × 2` candidates containing the parts
//!    (all of them, or any of them under [`MatchPolicy::AnyPart`])
//! 4. Score by the fraction of parts contained; exact full-name match scores 1.0
//! 5. Stable sort by score descending, truncate to `limit`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use roster_core::search::{EngineConfig, SearchEngine};
//! use roster_core::storage::MemoryRows;
//!
//! let rows = MemoryRows::from_names("الاسم", ["أحمد علي", "محمد أحمد"]);
//! let engine = SearchEngine::initialize(Arc::new(rows), EngineConfig::default()).unwrap();
//!
//! let outcome = engine.search("احمد", 5).unwrap();
//! assert_eq!(outcome.total_matches, 2);
//! assert_eq!(outcome.results[0].score, 1.0);
//! ```

mod engine;
pub mod scoring;

pub use engine::{
    EngineConfig, EngineError, MatchPolicy, MatchResult, SearchEngine, SearchOutcome,
    SearchStrategy, SearchableRecord, MIN_CANDIDATE_WINDOW,
};
