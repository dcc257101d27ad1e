//! Time-boxed result cache
//!
//! Entries expire lazily: an entry older than the TTL is treated as absent on
//! lookup and replaced on the next insert. [`ResultCache::spawn_sweeper`]
//! optionally bounds memory on long-running processes.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

struct Entry<V> {
    created_at: Instant,
    value: Arc<V>,
}

/// TTL-keyed memo table shared by every caller.
///
/// The lock is held only for O(1) bookkeeping, never while computing; two
/// concurrent misses on the same key both compute and the later insert wins.
pub struct ResultCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> ResultCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `key`, if any. Expired entries are dropped.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut entries = self.entries.lock();
        let found = entries
            .get(key)
            .map(|entry| (entry.created_at.elapsed() < self.ttl, Arc::clone(&entry.value)));

        match found {
            Some((true, value)) => Some(value),
            Some((false, _)) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Install `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.lock().insert(
            key,
            Entry {
                created_at: Instant::now(),
                value: Arc::clone(&value),
            },
        );
        value
    }

    /// Return the cached value for `key` or compute and install it.
    ///
    /// Errors from `compute` are returned as-is and nothing is cached.
    pub async fn get_or_try_compute<F, Fut, E>(&self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key) {
            debug!(key = ?key, "Cache hit");
            return Ok(hit);
        }

        debug!(key = ?key, "Cache miss");
        let value = compute().await?;
        Ok(self.insert(key, value))
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let ttl = self.ttl;
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.created_at.elapsed() < ttl);
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> ResultCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Send + Sync + 'static,
{
    /// Periodically purge expired entries until the returned task is aborted.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = self.purge_expired();
                if removed > 0 {
                    debug!(removed, remaining = self.len(), "Cache sweep");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type TestCache = ResultCache<(String, usize), String>;

    async fn lookup(cache: &TestCache, key: (&str, usize), calls: &AtomicUsize) -> String {
        let value = cache
            .get_or_try_compute((key.0.to_string(), key.1), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(format!("{}:{}", key.0, key.1))
            })
            .await
            .unwrap();
        value.to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl() {
        let cache = TestCache::new(DEFAULT_TTL);
        let calls = AtomicUsize::new(0);

        assert_eq!(lookup(&cache, ("احمد", 5), &calls).await, "احمد:5");
        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(lookup(&cache, ("احمد", 5), &calls).await, "احمد:5");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recompute_after_ttl() {
        let cache = TestCache::new(DEFAULT_TTL);
        let calls = AtomicUsize::new(0);

        lookup(&cache, ("احمد", 5), &calls).await;
        tokio::time::advance(Duration::from_secs(61)).await;
        lookup(&cache, ("احمد", 5), &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_limit_is_part_of_key() {
        let cache = TestCache::new(DEFAULT_TTL);
        let calls = AtomicUsize::new(0);

        lookup(&cache, ("احمد", 5), &calls).await;
        lookup(&cache, ("احمد", 10), &calls).await;
        lookup(&cache, ("احمد", 5), &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = TestCache::new(DEFAULT_TTL);
        let result = cache
            .get_or_try_compute(("x".to_string(), 1), || async { Err::<String, _>("boom") })
            .await;

        assert_eq!(result.unwrap_err(), "boom");
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = TestCache::new(Duration::from_secs(10));
        cache.insert(("a".into(), 1), "a".into());
        tokio::time::advance(Duration::from_secs(6)).await;
        cache.insert(("b".into(), 1), "b".into());
        tokio::time::advance(Duration::from_secs(5)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.get(&("b".into(), 1)).is_some());
        assert!(cache.get(&("a".into(), 1)).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_bounds_memory() {
        let cache = Arc::new(TestCache::new(Duration::from_secs(1)));
        cache.insert(("a".into(), 1), "a".into());
        let sweeper = Arc::clone(&cache).spawn_sweeper(Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(cache.is_empty());
        sweeper.abort();
    }
}
