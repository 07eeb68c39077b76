//! Trade History Service - cache-then-fetch composition
//!
//! A fresh cache hit is returned directly. On a miss or a stale entry the
//! request takes the per-key flight lock, re-checks the cache and only then
//! calls upstream, so concurrent identical requests share one upstream call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::gateway::cache::{CacheKey, HistoryCache};
use crate::upstream::{FetchError, HistoryFetcher, TradeList};

pub struct TradeHistoryService {
    cache: HistoryCache,
    fetcher: HistoryFetcher,
    ttl: Duration,
    /// One lock per key with a fetch in progress
    in_flight: DashMap<CacheKey, Arc<Mutex<()>>>,
}

impl TradeHistoryService {
    pub fn new(cache: HistoryCache, fetcher: HistoryFetcher, ttl: Duration) -> Self {
        Self {
            cache,
            fetcher,
            ttl,
            in_flight: DashMap::new(),
        }
    }

    pub fn cache(&self) -> &HistoryCache {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Trade history for the requested window, cached for `ttl`
    pub async fn get_history(
        &self,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<Arc<TradeList>, FetchError> {
        let key = CacheKey::from_range(start_time, end_time);

        if let Some(data) = self.fresh(&key) {
            tracing::info!("Serving from in-memory cache");
            return Ok(data);
        }

        let flight = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = flight.lock().await;

        let result = match self.fresh(&key) {
            Some(data) => {
                tracing::info!("Serving from in-memory cache");
                Ok(data)
            }
            None => self.fetch_and_store(&key, start_time, end_time).await,
        };

        // Drop the lock entry unless another request is queued on it
        self.in_flight
            .remove_if(&key, |_, lock| Arc::strong_count(lock) <= 2);

        result
    }

    fn fresh(&self, key: &CacheKey) -> Option<Arc<TradeList>> {
        self.cache
            .lookup(key)
            .filter(|entry| entry.is_fresh(Instant::now(), self.ttl))
            .map(|entry| entry.data)
    }

    async fn fetch_and_store(
        &self,
        key: &CacheKey,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<Arc<TradeList>, FetchError> {
        let trades = Arc::new(self.fetcher.fetch_history(start_time, end_time).await?);
        tracing::debug!("[cache] Storing {} trades under {}", trades.len(), key);
        self.cache.store(key.clone(), trades.clone(), Instant::now());
        Ok(trades)
    }
}
