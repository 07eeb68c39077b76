use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use super::cache::HistoryCache;
use super::services::TradeHistoryService;
use crate::config::{AppConfig, Credentials};
use crate::upstream::{HistoryFetcher, MetaStatsClient, TradeSource, UpstreamError};

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Cache + fetch composition behind `GET /`
    pub history: Arc<TradeHistoryService>,
}

impl AppState {
    pub fn new(history: Arc<TradeHistoryService>) -> Self {
        Self { history }
    }

    /// Wire the service around an arbitrary trade source
    pub fn with_source(
        config: &AppConfig,
        account_id: impl Into<String>,
        source: Arc<dyn TradeSource>,
    ) -> Self {
        let cache = match config.cache.max_entries {
            Some(max) => HistoryCache::bounded(max),
            None => HistoryCache::new(),
        };
        let fetcher = HistoryFetcher::new(source, account_id, config.upstream.history_start.clone());
        let ttl = Duration::from_secs(config.cache.ttl_secs);
        Self::new(Arc::new(TradeHistoryService::new(cache, fetcher, ttl)))
    }

    /// Production state backed by the MetaStats REST client
    pub fn from_config(config: &AppConfig, credentials: Credentials) -> Result<Self, UpstreamError> {
        let Credentials { token, account_id } = credentials;
        let client = metastats_client(config, token)?;
        Ok(Self::with_source(config, account_id, Arc::new(client)))
    }
}

fn metastats_client(config: &AppConfig, token: SecretString) -> Result<MetaStatsClient, UpstreamError> {
    MetaStatsClient::new(
        &config.upstream.base_url,
        token,
        Duration::from_millis(config.upstream.request_timeout_ms),
        config.upstream.limit,
    )
}
