//! CoinLore Client
//!
//! One GET of the whole ticker list per call. No retry, no
//! timeout, no caching.

use async_trait::async_trait;

use super::TickerSource;
use crate::error::{LookupError, Result};
use crate::model::{RawTicker, TickerListing};

/// Public ticker listing endpoint
pub const DEFAULT_TICKER_URL: &str = "https://api.coinlore.net/api/tickers/";

/// HTTP client for the CoinLore ticker listing
pub struct CoinLoreClient {
    client: reqwest::Client,
    url: String,
}

impl CoinLoreClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        // Lookups run on short-lived per-call runtimes; pooled connections
        // would outlive the runtime that opened them.
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decode a listing document
    pub fn parse_listing(body: &str) -> Result<Vec<RawTicker>> {
        let listing: TickerListing = serde_json::from_str(body)?;
        Ok(listing.data)
    }
}

#[async_trait]
impl TickerSource for CoinLoreClient {
    async fn fetch_listing(&self) -> Result<Vec<RawTicker>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let listing = Self::parse_listing(&body)?;

        tracing::debug!(url = %self.url, entries = listing.len(), "Fetched ticker listing");
        Ok(listing)
    }

    fn name(&self) -> &str {
        "CoinLore"
    }
}
