//! SearchEngine - ranked approximate name lookup over a row source

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use ahash::AHasher;
use thiserror::Error;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::scoring;
use crate::columns::detect_name_column_with;
use crate::normalize::Normalizer;
use crate::row::Row;
use crate::storage::{FilterMode, NameFilter, RowSource, StoreError};

/// Minimum number of candidates fetched per query, before the ×2 factor.
pub const MIN_CANDIDATE_WINDOW: usize = 10;

/// A row prepared for matching.
///
/// `id` is the 1-based position in load (or query) order and is only stable
/// within one engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchableRecord {
    pub id: usize,
    pub row: Row,
    pub normalized_name: String,
}

/// A scored record
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub score: f64,
    pub strategy: &'static str,
    pub record: Arc<SearchableRecord>,
}

/// Result of one search
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Candidates that survived retrieval (and the threshold), before truncation
    pub total_matches: usize,
    /// Best matches, score descending, ties in row order
    pub results: Vec<MatchResult>,
}

impl SearchOutcome {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Where candidates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Load every row once at startup and scan the precomputed index
    InMemory,
    /// Ask the row source to filter on every query
    QueryTime,
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().replace('_', "-").as_str() {
            "in-memory" | "memory" => Ok(Self::InMemory),
            "query-time" | "query" => Ok(Self::QueryTime),
            _ => Err(format!("unknown search strategy: {value}")),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => f.write_str("in-memory"),
            Self::QueryTime => f.write_str("query-time"),
        }
    }
}

/// Which records count as candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPolicy {
    /// A record must contain every query part
    AllParts,
    /// A record must contain at least one part and score at least `min_score`
    AnyPart { min_score: f64 },
}

impl MatchPolicy {
    fn filter_mode(&self) -> FilterMode {
        match self {
            Self::AllParts => FilterMode::All,
            Self::AnyPart { .. } => FilterMode::Any,
        }
    }

    fn min_score(&self) -> f64 {
        match self {
            Self::AllParts => 0.0,
            Self::AnyPart { min_score } => *min_score,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub strategy: SearchStrategy,
    pub policy: MatchPolicy,
    pub normalizer: Normalizer,
    /// Use this column instead of detecting one
    pub name_column: Option<String>,
    /// Index size above which scans run on rayon (with `parallel`)
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::InMemory,
            policy: MatchPolicy::AllParts,
            normalizer: Normalizer::new(),
            name_column: None,
            parallel_threshold: 10_000,
        }
    }
}

/// Engine errors
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// No column in the sample row looks like a name column
    #[error("no name column found among: {0}")]
    NameColumnNotFound(String),

    /// The configured name column is not in the table
    #[error("configured name column '{0}' does not exist")]
    UnknownNameColumn(String),

    /// The table has no rows
    #[error("table is empty")]
    EmptyTable,

    /// The row source could not be read during initialization
    #[error("storage unreachable: {0}")]
    StorageUnreachable(StoreError),

    /// The row source failed in the middle of a query
    #[error("query execution failed: {0}")]
    StorageQueryFailed(StoreError),
}

/// Immutable search engine.
///
/// Built once by [`SearchEngine::initialize`]; the name column is fixed for
/// the lifetime of the instance. Safe to share across threads.
pub struct SearchEngine {
    source: Arc<dyn RowSource>,
    name_key: String,
    config: EngineConfig,
    index: Vec<Arc<SearchableRecord>>,
    row_count: usize,
    index_hash: String,
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("source", &self.source.describe())
            .field("name_key", &self.name_key)
            .field("strategy", &self.config.strategy)
            .field("row_count", &self.row_count)
            .finish()
    }
}

impl SearchEngine {
    /// Open the engine against `source`.
    ///
    /// Detects the name column from the first row and, for the in-memory
    /// strategy, loads and normalizes every row.
    pub fn initialize(source: Arc<dyn RowSource>, config: EngineConfig) -> Result<Self, EngineError> {
        let start = Instant::now();

        let row_count = source.row_count().map_err(EngineError::StorageUnreachable)?;
        let sample = source
            .first_row()
            .map_err(EngineError::StorageUnreachable)?
            .filter(|_| row_count > 0)
            .ok_or(EngineError::EmptyTable)?;

        let name_key = resolve_name_column(&sample, &config)?;
        info!(column = %name_key, rows = row_count, source = %source.describe(), "Name column resolved");

        let index = match config.strategy {
            SearchStrategy::InMemory => {
                let rows = source.all_rows().map_err(EngineError::StorageUnreachable)?;
                build_index(rows, 0, &name_key, &config.normalizer)
            }
            SearchStrategy::QueryTime => Vec::new(),
        };

        let index_hash = compute_hash(&name_key, row_count, &index);

        info!(
            strategy = %config.strategy,
            indexed = index.len(),
            build_time_ms = start.elapsed().as_millis() as u64,
            hash = %index_hash,
            "Search engine ready"
        );

        Ok(Self {
            row_count,
            source,
            name_key,
            config,
            index,
            index_hash,
        })
    }

    /// Normalize a raw query with this engine's policy.
    pub fn normalize(&self, raw: &str) -> String {
        self.config.normalizer.normalize(raw)
    }

    /// Search for `query`, returning at most `max_results` matches.
    pub fn search(&self, query: &str, max_results: usize) -> Result<SearchOutcome, EngineError> {
        self.search_normalized(&self.normalize(query), max_results)
    }

    /// Search with a query that has already been normalized by [`Self::normalize`].
    pub fn search_normalized(
        &self,
        normalized_query: &str,
        max_results: usize,
    ) -> Result<SearchOutcome, EngineError> {
        if normalized_query.is_empty() {
            return Ok(SearchOutcome::empty());
        }

        let parts = scoring::query_parts(normalized_query);
        if parts.is_empty() {
            return Ok(SearchOutcome::empty());
        }

        let window = max_results.max(MIN_CANDIDATE_WINDOW) * 2;
        let filter = NameFilter::new(parts, self.config.policy.filter_mode());

        // Threshold survivors fill the window, not raw filter hits
        let mut matches = match self.config.strategy {
            SearchStrategy::InMemory => self.scan_index(normalized_query, &filter, window),
            SearchStrategy::QueryTime => self.fetch_candidates(normalized_query, &filter, window)?,
        };

        // Stable: equal scores keep row order
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_matches = matches.len();
        matches.truncate(max_results);

        debug!(
            query = %normalized_query,
            total = total_matches,
            returned = matches.len(),
            "Search finished"
        );

        Ok(SearchOutcome {
            total_matches,
            results: matches,
        })
    }

    /// Score one record, keeping it only if it clears the policy threshold.
    fn score_record(
        &self,
        normalized_query: &str,
        filter: &NameFilter,
        record: &Arc<SearchableRecord>,
    ) -> Option<MatchResult> {
        if !filter.matches(&record.normalized_name) {
            return None;
        }
        scoring::score_candidate(normalized_query, &filter.parts, &record.normalized_name)
            .filter(|m| m.score >= self.config.policy.min_score())
            .map(|m| MatchResult {
                score: m.score,
                strategy: m.strategy,
                record: Arc::clone(record),
            })
    }

    /// Scan the in-memory index, parallel above the configured threshold
    #[cfg(feature = "parallel")]
    fn scan_index(&self, normalized_query: &str, filter: &NameFilter, window: usize) -> Vec<MatchResult> {
        if self.index.len() >= self.config.parallel_threshold {
            let mut found: Vec<MatchResult> = self
                .index
                .par_iter()
                .filter_map(|record| self.score_record(normalized_query, filter, record))
                .collect();
            found.truncate(window);
            found
        } else {
            self.scan_sequential(normalized_query, filter, window)
        }
    }

    /// Scan the in-memory index
    #[cfg(not(feature = "parallel"))]
    fn scan_index(&self, normalized_query: &str, filter: &NameFilter, window: usize) -> Vec<MatchResult> {
        self.scan_sequential(normalized_query, filter, window)
    }

    fn scan_sequential(&self, normalized_query: &str, filter: &NameFilter, window: usize) -> Vec<MatchResult> {
        self.index
            .iter()
            .filter_map(|record| self.score_record(normalized_query, filter, record))
            .take(window)
            .collect()
    }

    /// Page through the row source until `window` records clear the
    /// threshold or the source runs dry (query-time strategy).
    fn fetch_candidates(
        &self,
        normalized_query: &str,
        filter: &NameFilter,
        window: usize,
    ) -> Result<Vec<MatchResult>, EngineError> {
        let mut found = Vec::new();
        let mut offset = 0;

        loop {
            let rows = self
                .source
                .filter_page(&self.name_key, filter, offset, window)
                .map_err(EngineError::StorageQueryFailed)?;
            let fetched = rows.len();

            for record in build_index(rows, offset, &self.name_key, &self.config.normalizer) {
                if let Some(m) = self.score_record(normalized_query, filter, &record) {
                    found.push(m);
                    if found.len() == window {
                        return Ok(found);
                    }
                }
            }

            if fetched < window {
                return Ok(found);
            }
            offset += fetched;
        }
    }

    /// The column names are matched against
    pub fn name_column(&self) -> &str {
        &self.name_key
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.config.strategy
    }

    pub fn normalizer(&self) -> Normalizer {
        self.config.normalizer
    }

    /// Row count seen at initialization
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Fingerprint of the loaded data, for change detection
    pub fn index_hash(&self) -> &str {
        &self.index_hash
    }
}

fn resolve_name_column(sample: &Row, config: &EngineConfig) -> Result<String, EngineError> {
    if let Some(column) = &config.name_column {
        return match sample.get(column) {
            Some(_) => Ok(column.clone()),
            None => Err(EngineError::UnknownNameColumn(column.clone())),
        };
    }

    detect_name_column_with(sample, &config.normalizer)
        .map(str::to_string)
        .ok_or_else(|| EngineError::NameColumnNotFound(sample.columns().collect::<Vec<_>>().join(", ")))
}

/// Normalize `rows` into records; ids continue from `offset`.
fn build_index(
    rows: Vec<Row>,
    offset: usize,
    name_key: &str,
    normalizer: &Normalizer,
) -> Vec<Arc<SearchableRecord>> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let normalized_name = row
                .get(name_key)
                .and_then(|v| v.as_text())
                .map(|name| normalizer.normalize(&name))
                .unwrap_or_default();
            Arc::new(SearchableRecord {
                id: offset + idx + 1,
                row,
                normalized_name,
            })
        })
        .collect()
}

fn compute_hash(name_key: &str, row_count: usize, index: &[Arc<SearchableRecord>]) -> String {
    let mut hasher = AHasher::default();
    name_key.hash(&mut hasher);
    row_count.hash(&mut hasher);
    for record in index {
        record.normalized_name.hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryRows, StoreResult};
    use pretty_assertions::assert_eq;

    fn engine_over(names: &[&str], config: EngineConfig) -> SearchEngine {
        let source = Arc::new(MemoryRows::from_names("name", names.iter().copied()));
        SearchEngine::initialize(source, config).unwrap()
    }

    fn both_strategies() -> [EngineConfig; 2] {
        [
            EngineConfig::default(),
            EngineConfig {
                strategy: SearchStrategy::QueryTime,
                ..Default::default()
            },
        ]
    }

    fn names(outcome: &SearchOutcome) -> Vec<String> {
        outcome
            .results
            .iter()
            .map(|m| m.record.row.get("name").unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_single_token_ties_keep_row_order() {
        for config in both_strategies() {
            let engine = engine_over(&["أحمد علي", "محمد أحمد"], config);
            let outcome = engine.search("احمد", 5).unwrap();

            assert_eq!(outcome.total_matches, 2);
            assert_eq!(names(&outcome), vec!["أحمد علي", "محمد أحمد"]);
            assert!(outcome.results.iter().all(|m| m.score == 1.0));
            assert_eq!(outcome.results[0].record.id, 1);
            assert_eq!(outcome.results[1].record.id, 2);
        }
    }

    #[test]
    fn test_empty_and_noise_queries() {
        let engine = engine_over(&["أحمد علي"], EngineConfig::default());

        for query in ["", "   ", "!!!", "ا ب"] {
            let outcome = engine.search(query, 5).unwrap();
            assert_eq!(outcome.total_matches, 0, "query {query:?}");
            assert!(outcome.results.is_empty());
        }
    }

    #[test]
    fn test_variant_spellings_match() {
        let engine = engine_over(&["إسماعيل مُصطفى"], EngineConfig::default());
        let outcome = engine.search("اسماعيل مصطفي", 5).unwrap();
        assert_eq!(outcome.total_matches, 1);
        assert_eq!(outcome.results[0].score, 1.0);
        assert_eq!(outcome.results[0].strategy, "exact");
    }

    #[test]
    fn test_all_parts_required() {
        let engine = engine_over(&["أحمد علي", "أحمد حسن", "علي حسن"], EngineConfig::default());
        let outcome = engine.search("احمد حسن", 5).unwrap();
        assert_eq!(names(&outcome), vec!["أحمد حسن"]);
    }

    #[test]
    fn test_any_part_policy_ranks_by_score() {
        let config = EngineConfig {
            policy: MatchPolicy::AnyPart { min_score: 0.5 },
            ..Default::default()
        };
        for strategy in [SearchStrategy::InMemory, SearchStrategy::QueryTime] {
            let engine = engine_over(
                &["علي حسن", "أحمد علي حسن", "محمد", "حسن"],
                EngineConfig {
                    strategy,
                    ..config.clone()
                },
            );
            let outcome = engine.search("احمد علي حسن", 10).unwrap();

            assert_eq!(names(&outcome), vec!["أحمد علي حسن", "علي حسن"]);
            assert_eq!(outcome.total_matches, 2);
            assert_eq!(outcome.results[0].score, 1.0);
            assert!((outcome.results[1].score - 2.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_below_threshold_rows_do_not_fill_window() {
        let mut roster: Vec<String> = (0..20).map(|i| format!("علي {i}")).collect();
        roster.push("احمد علي حسن".to_string());
        roster.push("علي حسن".to_string());
        let refs: Vec<&str> = roster.iter().map(String::as_str).collect();

        for strategy in [SearchStrategy::InMemory, SearchStrategy::QueryTime] {
            let engine = engine_over(
                &refs,
                EngineConfig {
                    strategy,
                    policy: MatchPolicy::AnyPart { min_score: 0.5 },
                    ..Default::default()
                },
            );
            let outcome = engine.search("احمد علي حسن", 10).unwrap();

            assert_eq!(outcome.total_matches, 2, "strategy {strategy}");
            assert_eq!(names(&outcome), vec!["احمد علي حسن", "علي حسن"]);
            assert_eq!(outcome.results[0].strategy, "exact");
            assert_eq!(outcome.results[0].record.id, 21);
        }
    }

    #[test]
    fn test_query_time_window_counts_survivors() {
        // 25 weak rows then 30 strong ones: survivors must still fill the window
        let mut roster: Vec<String> = (0..25).map(|i| format!("علي {i}")).collect();
        roster.extend((0..30).map(|i| format!("احمد علي {i}")));
        let refs: Vec<&str> = roster.iter().map(String::as_str).collect();

        for strategy in [SearchStrategy::InMemory, SearchStrategy::QueryTime] {
            let engine = engine_over(
                &refs,
                EngineConfig {
                    strategy,
                    policy: MatchPolicy::AnyPart { min_score: 0.5 },
                    ..Default::default()
                },
            );
            let outcome = engine.search("احمد علي حسن", 5).unwrap();

            assert_eq!(outcome.total_matches, MIN_CANDIDATE_WINDOW * 2, "strategy {strategy}");
            assert_eq!(outcome.results.len(), 5);
            assert!(outcome.results.iter().all(|m| m.score >= 0.5));
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scan_matches_sequential() {
        let mut roster: Vec<String> = (0..40).map(|i| format!("علي {i}")).collect();
        roster.extend((0..40).map(|i| format!("محمد علي {i}")));
        roster.insert(57, "محمد علي".to_string());
        let refs: Vec<&str> = roster.iter().map(String::as_str).collect();

        for policy in [MatchPolicy::AllParts, MatchPolicy::AnyPart { min_score: 0.5 }] {
            let sequential = engine_over(
                &refs,
                EngineConfig {
                    policy,
                    parallel_threshold: usize::MAX,
                    ..Default::default()
                },
            );
            let parallel = engine_over(
                &refs,
                EngineConfig {
                    policy,
                    parallel_threshold: 0,
                    ..Default::default()
                },
            );

            for limit in [1, 7, 30] {
                let a = sequential.search("محمد علي", limit).unwrap();
                let b = parallel.search("محمد علي", limit).unwrap();
                assert_eq!(a.total_matches, b.total_matches);
                let ids = |o: &SearchOutcome| o.results.iter().map(|m| m.record.id).collect::<Vec<_>>();
                assert_eq!(ids(&a), ids(&b));
            }
        }
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let config = EngineConfig {
            policy: MatchPolicy::AnyPart { min_score: 0.1 },
            ..Default::default()
        };
        let engine = engine_over(&["علي محمود", "علي حسن", "حسن"], config);
        let outcome = engine.search("علي حسن", 10).unwrap();

        assert_eq!(names(&outcome), vec!["علي حسن", "علي محمود", "حسن"]);
        assert_eq!(outcome.results[0].strategy, "exact");
        assert_eq!(outcome.results[1].score, 0.5);
        for pair in outcome.results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_truncation_and_total() {
        let roster: Vec<String> = (0..40).map(|i| format!("محمد {i}")).collect();
        let refs: Vec<&str> = roster.iter().map(String::as_str).collect();
        let engine = engine_over(&refs, EngineConfig::default());

        let outcome = engine.search("محمد", 3).unwrap();
        assert_eq!(outcome.results.len(), 3);
        // Candidate window is max(3, 10) * 2
        assert_eq!(outcome.total_matches, 20);

        let outcome = engine.search("محمد", 15).unwrap();
        assert_eq!(outcome.results.len(), 15);
        assert_eq!(outcome.total_matches, 30);
    }

    #[test]
    fn test_deterministic() {
        let engine = engine_over(&["سارة أحمد", "أحمد سارة", "سارة"], EngineConfig::default());
        let first: Vec<usize> = engine.search("سارة", 10).unwrap().results.iter().map(|m| m.record.id).collect();
        for _ in 0..5 {
            let again: Vec<usize> = engine.search("سارة", 10).unwrap().results.iter().map(|m| m.record.id).collect();
            assert_eq!(first, again);
        }
        assert_eq!(first, vec![1, 2, 3]);
    }

    #[test]
    fn test_detects_name_column() {
        let rows = vec![
            Row::new().with("id", 1i64).with("الاسم الكامل", "أحمد علي").with("age", 30i64),
            Row::new().with("id", 2i64).with("الاسم الكامل", "منى سعيد").with("age", None::<i64>),
        ];
        let engine = SearchEngine::initialize(Arc::new(MemoryRows::new(rows)), EngineConfig::default()).unwrap();

        assert_eq!(engine.name_column(), "الاسم الكامل");
        let outcome = engine.search("منى", 5).unwrap();
        assert_eq!(outcome.results[0].record.row.get("id"), Some(&2i64.into()));
    }

    #[test]
    fn test_numeric_name_values_are_searchable() {
        let rows = vec![Row::new().with("name", 12345i64), Row::new().with("name", None::<String>)];
        let engine = SearchEngine::initialize(Arc::new(MemoryRows::new(rows)), EngineConfig::default()).unwrap();
        assert_eq!(engine.search("234", 5).unwrap().total_matches, 1);
    }

    #[test]
    fn test_startup_failures() {
        let empty = Arc::new(MemoryRows::new(Vec::new()));
        assert!(matches!(
            SearchEngine::initialize(empty, EngineConfig::default()),
            Err(EngineError::EmptyTable)
        ));

        let no_name = Arc::new(MemoryRows::new(vec![Row::new().with("id", 1i64).with("age", 3i64)]));
        assert!(matches!(
            SearchEngine::initialize(no_name.clone(), EngineConfig::default()),
            Err(EngineError::NameColumnNotFound(_))
        ));

        let config = EngineConfig {
            name_column: Some("missing".into()),
            ..Default::default()
        };
        assert!(matches!(
            SearchEngine::initialize(no_name.clone(), config),
            Err(EngineError::UnknownNameColumn(_))
        ));

        let config = EngineConfig {
            name_column: Some("age".into()),
            ..Default::default()
        };
        assert_eq!(SearchEngine::initialize(no_name, config).unwrap().name_column(), "age");
    }

    struct BrokenRows;

    impl RowSource for BrokenRows {
        fn row_count(&self) -> StoreResult<usize> {
            Ok(1)
        }

        fn first_row(&self) -> StoreResult<Option<Row>> {
            Ok(Some(Row::new().with("name", "x")))
        }

        fn all_rows(&self) -> StoreResult<Vec<Row>> {
            Err(StoreError::Query("disk I/O error".into()))
        }

        fn filter_page(&self, _: &str, _: &NameFilter, _: usize, _: usize) -> StoreResult<Vec<Row>> {
            Err(StoreError::Query("disk I/O error".into()))
        }
    }

    #[test]
    fn test_storage_failures_propagate() {
        assert!(matches!(
            SearchEngine::initialize(Arc::new(BrokenRows), EngineConfig::default()),
            Err(EngineError::StorageUnreachable(_))
        ));

        let config = EngineConfig {
            strategy: SearchStrategy::QueryTime,
            ..Default::default()
        };
        let engine = SearchEngine::initialize(Arc::new(BrokenRows), config).unwrap();
        assert!(matches!(
            engine.search("محمد", 5),
            Err(EngineError::StorageQueryFailed(_))
        ));
    }

    #[test]
    fn test_strict_policy_applies_to_index_and_query() {
        let config = EngineConfig {
            normalizer: Normalizer::strict(),
            ..Default::default()
        };
        let engine = engine_over(&["فاطمة"], config);
        assert_eq!(engine.search("فاطمه", 5).unwrap().total_matches, 1);

        let engine = engine_over(&["فاطمة"], EngineConfig::default());
        assert_eq!(engine.search("فاطمه", 5).unwrap().total_matches, 0);
    }

    #[test]
    fn test_index_hash_changes_with_data() {
        let a = engine_over(&["علي"], EngineConfig::default());
        let b = engine_over(&["حسن"], EngineConfig::default());
        assert_ne!(a.index_hash(), b.index_hash());
        assert_eq!(a.index_hash(), engine_over(&["علي"], EngineConfig::default()).index_hash());
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("in-memory".parse::<SearchStrategy>().unwrap(), SearchStrategy::InMemory);
        assert_eq!("QUERY_TIME".parse::<SearchStrategy>().unwrap(), SearchStrategy::QueryTime);
        assert!("disk".parse::<SearchStrategy>().is_err());
    }
}
