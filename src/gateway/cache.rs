//! TTL cache for trade-history responses
//!
//! One entry per requested time range. Entries are never expired in the
//! background: freshness is judged by the reader, and a stale entry is simply
//! overwritten by the next successful fetch.

use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::upstream::TradeList;

/// Default freshness window
pub const TTL_SECONDS: u64 = 60;

/// Placeholder for an absent bound in a [`CacheKey`]
const ABSENT: &str = "-";

/// Fingerprint of a `(start_time, end_time)` query.
///
/// Present values are length-prefixed (`5:hello`) and absent ones are `-`, so
/// an absent bound never collides with any supplied text and no two distinct
/// pairs share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_range(start_time: Option<&str>, end_time: Option<&str>) -> Self {
        Self(format!("{}|{}", encode(start_time), encode(end_time)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn encode(part: Option<&str>) -> String {
    match part {
        Some(value) => format!("{}:{}", value.len(), value),
        None => ABSENT.to_string(),
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cached upstream payload and the instant it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Arc<TradeList>,
    pub stored_at: Instant,
}

impl CacheEntry {
    /// `true` while `now - stored_at < ttl`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// Process-local history cache, shared by all request handlers
pub struct HistoryCache {
    entries: DashMap<CacheKey, CacheEntry>,
    max_entries: Option<usize>,
}

impl HistoryCache {
    /// Unbounded cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: None,
        }
    }

    /// Cache holding at most `max_entries` ranges; the oldest entry is evicted
    /// to make room for a new key.
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: Some(max_entries.max(1)),
        }
    }

    /// Entry for `key`, fresh or not
    pub fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `data` under `key`, replacing any previous entry
    pub fn store(&self, key: CacheKey, data: Arc<TradeList>, now: Instant) {
        if let Some(max) = self.max_entries {
            if !self.entries.contains_key(&key) {
                while self.entries.len() >= max {
                    if !self.evict_oldest() {
                        break;
                    }
                }
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                data,
                stored_at: now,
            },
        );
    }

    fn evict_oldest(&self) -> bool {
        // Collect the key first: removing while iterating would deadlock the shard
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().stored_at)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(key) => {
                tracing::debug!("[cache] Evicting {}", key);
                self.entries.remove(&key).is_some()
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trades(id: &str) -> Arc<TradeList> {
        let record = json!({ "id": id, "profit": 10.0 });
        Arc::new(vec![record.as_object().unwrap().clone()])
    }

    fn first_id(entry: &CacheEntry) -> &str {
        entry.data[0]["id"].as_str().unwrap()
    }

    #[test]
    fn test_ttl_constant() {
        assert_eq!(TTL_SECONDS, 60);
    }

    #[test]
    fn test_freshness_boundary() {
        let ttl = Duration::from_secs(TTL_SECONDS);
        let cache = HistoryCache::new();
        let key = CacheKey::from_range(None, None);
        let t0 = Instant::now();
        cache.store(key.clone(), trades("t1"), t0);

        let entry = cache.lookup(&key).unwrap();
        assert!(entry.is_fresh(t0 + Duration::from_secs(59), ttl));
        assert!(!entry.is_fresh(t0 + Duration::from_secs(60), ttl));
        assert!(!entry.is_fresh(t0 + Duration::from_secs(61), ttl));
    }

    #[test]
    fn test_lookup_returns_stale_entries() {
        let cache = HistoryCache::new();
        let key = CacheKey::from_range(Some("a"), None);
        let t0 = Instant::now();
        cache.store(key.clone(), trades("t1"), t0);

        let entry = cache.lookup(&key).unwrap();
        assert!(!entry.is_fresh(t0 + Duration::from_secs(3600), Duration::from_secs(60)));
    }

    #[test]
    fn test_clock_before_store_counts_as_fresh() {
        let t0 = Instant::now() + Duration::from_secs(5);
        let entry = CacheEntry {
            data: trades("t1"),
            stored_at: t0,
        };
        assert!(entry.is_fresh(Instant::now(), Duration::from_secs(60)));
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = CacheKey::from_range(Some("2025-01-01 00:00:00.000"), Some("2025-01-02 00:00:00.000"));
        let b = CacheKey::from_range(Some("2025-01-01 00:00:00.000"), Some("2025-01-02 00:00:00.000"));
        assert_eq!(a, b);
        assert_eq!(CacheKey::from_range(None, None), CacheKey::from_range(None, None));
    }

    #[test]
    fn test_keys_distinguish_absent_values() {
        let keys = [
            CacheKey::from_range(None, None),
            CacheKey::from_range(Some("x"), None),
            CacheKey::from_range(None, Some("x")),
            CacheKey::from_range(Some("x"), Some("x")),
            CacheKey::from_range(Some("None"), Some("None")),
            CacheKey::from_range(Some(""), None),
            CacheKey::from_range(Some("-"), Some("-")),
            CacheKey::from_range(Some("a|1:b"), None),
            CacheKey::from_range(Some("a"), Some("b|-")),
            CacheKey::from_range(Some("a"), Some("b")),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b, "{} collides with {}", a, b);
            }
        }
    }

    #[test]
    fn test_store_overwrites() {
        let cache = HistoryCache::new();
        let key = CacheKey::from_range(Some("s"), Some("e"));
        let t0 = Instant::now();

        cache.store(key.clone(), trades("first"), t0);
        cache.store(key.clone(), trades("second"), t0 + Duration::from_secs(1));

        assert_eq!(cache.len(), 1);
        let entry = cache.lookup(&key).unwrap();
        assert_eq!(first_id(&entry), "second");
        assert_eq!(entry.stored_at, t0 + Duration::from_secs(1));
    }

    #[test]
    fn test_bounded_cache_evicts_oldest() {
        let cache = HistoryCache::bounded(2);
        let t0 = Instant::now();
        let k1 = CacheKey::from_range(Some("1"), None);
        let k2 = CacheKey::from_range(Some("2"), None);
        let k3 = CacheKey::from_range(Some("3"), None);

        cache.store(k1.clone(), trades("1"), t0);
        cache.store(k2.clone(), trades("2"), t0 + Duration::from_secs(1));
        // Refreshing an existing key never evicts
        cache.store(k1.clone(), trades("1b"), t0 + Duration::from_secs(2));
        assert_eq!(cache.len(), 2);

        cache.store(k3.clone(), trades("3"), t0 + Duration::from_secs(3));
        assert_eq!(cache.len(), 2);
        assert!(cache.lookup(&k2).is_none());
        assert!(cache.lookup(&k1).is_some());
        assert!(cache.lookup(&k3).is_some());
    }

    #[test]
    fn test_unbounded_cache_grows() {
        let cache = HistoryCache::new();
        let t0 = Instant::now();
        for i in 0..100 {
            cache.store(CacheKey::from_range(Some(&i.to_string()), None), trades("t"), t0);
        }
        assert_eq!(cache.len(), 100);
        assert!(!cache.is_empty());
    }
}
