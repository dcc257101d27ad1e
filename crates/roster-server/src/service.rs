//! Lookup service: admission queue + result cache in front of the engine

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use roster_core::{SearchEngine, SearchOutcome};

use crate::cache::{ResultCache, DEFAULT_TTL};
use crate::logging::prefix;
use crate::queue::{AdmissionQueue, QueueStats, QueueTask, QueueTaskError, DEFAULT_MAX_CONCURRENT};

/// Hard ceiling on results per query
pub const MAX_LIMIT: usize = 50;

/// Limit used when the caller does not provide one
pub const DEFAULT_LIMIT: usize = 10;

/// Queries normalizing to fewer characters are rejected before admission
pub const MIN_QUERY_CHARS: usize = 2;

/// Cache key: distinct limits are distinct entries. `generation` names the
/// installed engine the entry was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub generation: u64,
    pub query: String,
    pub limit: usize,
}

pub type SearchCache = ResultCache<CacheKey, SearchOutcome>;

/// Service tuning
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_concurrent: usize,
    pub cache_ttl: Duration,
    pub default_limit: usize,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            cache_ttl: DEFAULT_TTL,
            default_limit: DEFAULT_LIMIT,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Errors visible to callers. Internal detail stays in the logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("service is not ready")]
    NotReady,

    #[error("timed out waiting for search")]
    Timeout,

    #[error("search failed")]
    Failed,
}

/// One query's execution, carried through the admission queue
pub struct SearchJob {
    engine: Arc<SearchEngine>,
    cache: Arc<SearchCache>,
    key: CacheKey,
    reply: oneshot::Sender<Result<Arc<SearchOutcome>, LookupError>>,
}

impl QueueTask for SearchJob {
    async fn run(self) -> Result<(), QueueTaskError> {
        let SearchJob {
            engine,
            cache,
            key,
            reply,
        } = self;
        let start = Instant::now();

        let query = key.query.clone();
        let limit = key.limit;
        let computed = cache
            .get_or_try_compute(key.clone(), move || async move {
                // Storage reads may block
                match tokio::task::spawn_blocking(move || engine.search_normalized(&query, limit)).await {
                    Ok(result) => result.map_err(|e| e.to_string()),
                    Err(e) => Err(format!("search worker aborted: {e}")),
                }
            })
            .await;

        match computed {
            Ok(outcome) => {
                info!(
                    query = %key.query,
                    limit = key.limit,
                    total = outcome.total_matches,
                    returned = outcome.results.len(),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "{} Query completed",
                    prefix::QUERY
                );
                if reply.send(Ok(outcome)).is_err() {
                    debug!(query = %key.query, "Caller went away before the result was ready");
                }
                Ok(())
            }
            Err(detail) => {
                let _ = reply.send(Err(LookupError::Failed));
                Err(QueueTaskError::Failed(format!(
                    "query '{}' (limit {}): {}",
                    key.query, key.limit, detail
                )))
            }
        }
    }
}

/// Readiness and occupancy report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub ready: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_hash: Option<String>,
    pub queue: QueueStats,
    pub cache_entries: usize,
    /// Lookups that returned a result, cache hits included
    pub queries_served: u64,
    pub uptime_seconds: u64,
}

struct Installed {
    engine: Arc<SearchEngine>,
    generation: u64,
}

/// The lookup service.
///
/// Constructed empty; [`SearchService::install`] makes it ready. Until then
/// every lookup fails with [`LookupError::NotReady`].
pub struct SearchService {
    installed: RwLock<Option<Installed>>,
    cache: Arc<SearchCache>,
    queue: AdmissionQueue<SearchJob>,
    config: ServiceConfig,
    start_time: Instant,
    queries_served: AtomicU64,
}

impl SearchService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            installed: RwLock::new(None),
            cache: Arc::new(ResultCache::new(config.cache_ttl)),
            queue: AdmissionQueue::new(config.max_concurrent),
            config,
            start_time: Instant::now(),
            queries_served: AtomicU64::new(0),
        }
    }

    /// Make `engine` the active engine. Replacing an engine drops every
    /// cached result computed against the old one.
    pub fn install(&self, engine: Arc<SearchEngine>) {
        let replaced = {
            let mut installed = self.installed.write();
            let generation = installed.as_ref().map_or(0, |i| i.generation + 1);
            installed.replace(Installed { engine, generation }).is_some()
        };
        if replaced {
            self.cache.clear();
            info!("Search engine replaced, cache cleared");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.installed.read().is_some()
    }

    pub fn engine(&self) -> Option<Arc<SearchEngine>> {
        self.installed.read().as_ref().map(|i| Arc::clone(&i.engine))
    }

    fn current(&self) -> Option<(Arc<SearchEngine>, u64)> {
        self.installed
            .read()
            .as_ref()
            .map(|i| (Arc::clone(&i.engine), i.generation))
    }

    pub fn cache(&self) -> &Arc<SearchCache> {
        &self.cache
    }

    pub fn queue_stats(&self) -> QueueStats {
        self.queue.stats()
    }

    /// Validate a request and build its cache key.
    fn prepare(
        &self,
        name: &str,
        limit: Option<usize>,
    ) -> Result<(Arc<SearchEngine>, CacheKey), LookupError> {
        if name.trim().is_empty() {
            return Err(LookupError::InvalidQuery("name is required".into()));
        }

        let limit = match limit {
            Some(0) => return Err(LookupError::InvalidQuery("limit must be positive".into())),
            Some(n) => n.min(MAX_LIMIT),
            None => self.config.default_limit.min(MAX_LIMIT),
        };

        let (engine, generation) = self.current().ok_or(LookupError::NotReady)?;

        let query = engine.normalize(name);
        if query.chars().count() < MIN_QUERY_CHARS {
            return Err(LookupError::InvalidQuery(format!(
                "name must contain at least {MIN_QUERY_CHARS} letters or digits"
            )));
        }

        Ok((
            engine,
            CacheKey {
                generation,
                query,
                limit,
            },
        ))
    }

    /// Look `name` up, queueing behind other in-flight queries if needed.
    pub async fn lookup(
        &self,
        name: &str,
        limit: Option<usize>,
    ) -> Result<Arc<SearchOutcome>, LookupError> {
        let (engine, key) = match self.prepare(name, limit) {
            Ok(prepared) => prepared,
            Err(e) => {
                debug!(error = %e, "Query rejected");
                return Err(e);
            }
        };

        info!(query = %key.query, limit = key.limit, "{} Query received", prefix::QUERY);

        let (reply, response) = oneshot::channel();
        let query = key.query.clone();
        self.queue.submit(SearchJob {
            engine,
            cache: Arc::clone(&self.cache),
            key,
            reply,
        });

        match tokio::time::timeout(self.config.request_timeout, response).await {
            Ok(Ok(result)) => {
                if result.is_ok() {
                    self.queries_served.fetch_add(1, Ordering::Relaxed);
                }
                result
            }
            // Job dropped without replying (panicked)
            Ok(Err(_)) => Err(LookupError::Failed),
            Err(_) => {
                warn!(query = %query, timeout_ms = self.config.request_timeout.as_millis() as u64, "Query timed out");
                Err(LookupError::Timeout)
            }
        }
    }

    pub fn health(&self) -> HealthReport {
        let engine = self.engine();
        HealthReport {
            ready: engine.is_some(),
            message: if engine.is_some() {
                "Roster lookup service ready".to_string()
            } else {
                "Service running, awaiting roster load".to_string()
            },
            rows: engine.as_ref().map(|e| e.row_count()),
            name_column: engine.as_ref().map(|e| e.name_column().to_string()),
            strategy: engine.as_ref().map(|e| e.strategy().to_string()),
            index_hash: engine.as_ref().map(|e| e.index_hash().to_string()),
            queue: self.queue.stats(),
            cache_entries: self.cache.len(),
            queries_served: self.queries_served.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}
