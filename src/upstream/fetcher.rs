use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use super::error::FetchError;
use super::range::resolve_range;
use super::{TradeList, TradeSource};

/// Fetch layer: resolves the requested window and queries the upstream for
/// one account, always asking it to refresh its trade history first.
pub struct HistoryFetcher {
    source: Arc<dyn TradeSource>,
    account_id: String,
    history_start: String,
}

impl HistoryFetcher {
    pub fn new(
        source: Arc<dyn TradeSource>,
        account_id: impl Into<String>,
        history_start: impl Into<String>,
    ) -> Self {
        Self {
            source,
            account_id: account_id.into(),
            history_start: history_start.into(),
        }
    }

    pub async fn fetch_history(
        &self,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<TradeList, FetchError> {
        let range = resolve_range(start_time, end_time, &self.history_start, Utc::now());

        info!(
            "Fetching trading history from {} to {}",
            range.start_time, range.end_time
        );

        self.source
            .get_account_trades(&self.account_id, &range.start_time, &range.end_time, true)
            .await
            .map_err(|e| {
                error!("Error fetching trading history: {}", e);
                FetchError::from(e)
            })
    }
}
