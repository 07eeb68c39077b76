//! Trade History Gateway
//!
//! Caching HTTP front for the MetaStats account trade-history API.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration and credentials from the environment
//! - [`logging`] - tracing subscriber setup
//! - [`upstream`] - MetaStats client and the fetch layer
//! - [`gateway`] - axum router, history cache and handlers

pub mod config;
pub mod gateway;
pub mod logging;
pub mod upstream;

// Convenient re-exports at crate root
pub use config::{AppConfig, Credentials};
pub use gateway::cache::{CacheEntry, CacheKey, HistoryCache};
pub use gateway::services::TradeHistoryService;
pub use gateway::state::AppState;
pub use upstream::{FetchError, HistoryFetcher, TradeList, TradeRecord, TradeSource, UpstreamError};
