//! MetaStats upstream
//!
//! - [`range`] - default time range resolution and wire formatting
//! - [`metastats`] - REST client for the historical-trades endpoint
//! - [`fetcher`] - the fetch layer used by the gateway
//! - [`error`] - upstream and fetch errors

pub mod error;
pub mod fetcher;
pub mod metastats;
pub mod range;

use async_trait::async_trait;

pub use error::{FetchError, UpstreamError};
pub use fetcher::HistoryFetcher;
pub use metastats::MetaStatsClient;
pub use range::{DEFAULT_HISTORY_START, TimeRange, format_upstream_time, resolve_range};

/// One trade as returned by the upstream. The shape is not interpreted here.
pub type TradeRecord = serde_json::Map<String, serde_json::Value>;

/// Trade history payload, passed through unchanged
pub type TradeList = Vec<TradeRecord>;

/// Source of account trade history
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// Trades of `account_id` between `start_time` and `end_time`.
    ///
    /// With `update_history` set the upstream refreshes the account's trade
    /// history before answering.
    async fn get_account_trades(
        &self,
        account_id: &str,
        start_time: &str,
        end_time: &str,
        update_history: bool,
    ) -> Result<TradeList, UpstreamError>;
}
