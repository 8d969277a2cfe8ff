//! Static Ticker Source
//!
//! For testing and demo purposes. Serves a fixed listing, or a fixed
//! failure, and counts how often it was asked.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::TickerSource;
use crate::error::{LookupError, Result};
use crate::model::{RawTicker, Ticker};

/// Ticker source backed by an in-memory listing
pub struct StaticTickerSource {
    listing: std::result::Result<Vec<RawTicker>, String>,
    fetches: AtomicUsize,
}

impl StaticTickerSource {
    pub fn new(tickers: &[Ticker]) -> Self {
        Self::from_raw(tickers.iter().map(RawTicker::from).collect())
    }

    pub const fn from_raw(listing: Vec<RawTicker>) -> Self {
        Self {
            listing: Ok(listing),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Listing decoded from a JSON document in the CoinLore shape
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(Self::from_raw(super::CoinLoreClient::parse_listing(body)?))
    }

    /// A source whose every fetch fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            listing: Err(reason.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of fetches served so far
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TickerSource for StaticTickerSource {
    async fn fetch_listing(&self) -> Result<Vec<RawTicker>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.listing.clone().map_err(LookupError::Source)
    }

    fn name(&self) -> &str {
        "Static"
    }
}
