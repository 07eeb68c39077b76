//! MetaStats REST client
//!
//! Implements [`TradeSource`] over the `historical-trades` endpoint:
//!
//! ```text
//! GET {base_url}/users/current/accounts/{account_id}/historical-trades/{start}/{end}
//!     ?updateHistory=true&limit=1000&offset=0
//! auth-token: {token}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::error::UpstreamError;
use super::{TradeList, TradeSource};

/// Envelope of a successful historical-trades response
#[derive(Deserialize)]
struct HistoricalTradesResponse {
    trades: TradeList,
}

/// Error body returned by MetaApi services
#[derive(Deserialize, Default)]
struct MetaStatsErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the MetaStats API
pub struct MetaStatsClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
    limit: u32,
}

impl MetaStatsClient {
    pub fn new(
        base_url: &str,
        token: SecretString,
        timeout: Duration,
        limit: u32,
    ) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::Config(format!("invalid base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Config(format!(
                "base url {} cannot carry a path",
                base_url
            )));
        }

        info!("Initializing MetaStats client for {}", base_url);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token,
            limit,
        })
    }

    /// Build the request URL. Each path segment is percent-encoded, so the
    /// space inside a time string travels as `%20`.
    fn trades_url(
        &self,
        account_id: &str,
        start_time: &str,
        end_time: &str,
        update_history: bool,
    ) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Config(format!("base url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend([
                "users",
                "current",
                "accounts",
                account_id,
                "historical-trades",
                start_time,
                end_time,
            ]);
        url.query_pairs_mut()
            .append_pair("updateHistory", if update_history { "true" } else { "false" })
            .append_pair("limit", &self.limit.to_string())
            .append_pair("offset", "0");
        Ok(url)
    }
}

#[async_trait]
impl TradeSource for MetaStatsClient {
    async fn get_account_trades(
        &self,
        account_id: &str,
        start_time: &str,
        end_time: &str,
        update_history: bool,
    ) -> Result<TradeList, UpstreamError> {
        let url = self.trades_url(account_id, start_time, end_time, update_history)?;
        debug!("GET {}", url.path());

        let response = self
            .http
            .get(url)
            .header("auth-token", self.token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let parsed: MetaStatsErrorBody = serde_json::from_slice(&body).unwrap_or_default();
            let message = parsed
                .message
                .or(parsed.error)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
            warn!("MetaStats request failed with {}: {}", status, message);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: HistoricalTradesResponse =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        debug!("MetaStats returned {} trades", parsed.trades.len());
        Ok(parsed.trades)
    }
}
