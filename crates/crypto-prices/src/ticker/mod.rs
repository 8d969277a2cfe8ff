//! Ticker Sources
//!
//! Where the full ticker listing comes from: the CoinLore HTTP API in
//! production, a static fixture in tests and demos.

mod coinlore;
mod fixture;

pub use coinlore::{CoinLoreClient, DEFAULT_TICKER_URL};
pub use fixture::StaticTickerSource;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::RawTicker;

/// Ticker listing provider (Strategy pattern)
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetch the complete listing, fresh on every call
    async fn fetch_listing(&self) -> Result<Vec<RawTicker>>;

    /// Source name
    fn name(&self) -> &str;
}
