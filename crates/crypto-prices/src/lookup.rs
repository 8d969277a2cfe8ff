//! Price Lookup
//!
//! Fetch the full listing, scan it linearly for the first case-insensitive
//! symbol match, validate that one entry.

use std::sync::Arc;

use crate::error::{LookupError, Result};
use crate::format::render;
use crate::model::{RawTicker, Ticker};
use crate::ticker::TickerSource;

/// First entry whose symbol matches, or `NotFound` after the whole list
pub fn find_ticker(listing: &[RawTicker], symbol: &str) -> Result<Ticker> {
    for entry in listing {
        if entry.matches(symbol)? {
            return entry.to_ticker();
        }
    }
    Err(LookupError::NotFound(symbol.to_string()))
}

/// Symbol lookup against a ticker source
#[derive(Clone)]
pub struct PriceLookup {
    source: Arc<dyn TickerSource>,
}

impl PriceLookup {
    pub fn new(source: Arc<dyn TickerSource>) -> Self {
        Self { source }
    }

    /// Typed outcome: the matched ticker, a miss, or a fault
    pub async fn lookup(&self, symbol: &str) -> Result<Ticker> {
        let listing = self.source.fetch_listing().await?;
        find_ticker(&listing, symbol)
    }

    /// Rendered outcome; always text, never an error
    pub async fn lookup_text(&self, symbol: &str) -> String {
        let outcome = self.lookup(symbol).await;
        self.describe(symbol, &outcome)
    }

    /// Log a miss or fault and render the outcome as text
    pub fn describe(&self, symbol: &str, outcome: &Result<Ticker>) -> String {
        if let Err(e) = outcome {
            if e.is_not_found() {
                tracing::info!(symbol, source = self.source.name(), "Symbol not listed");
            } else {
                tracing::warn!(symbol, source = self.source.name(), error = %e, "Price lookup failed");
            }
        }
        render(outcome)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ticker::StaticTickerSource;

    fn ticker(symbol: &str, name: &str, cap: rust_decimal::Decimal) -> Ticker {
        Ticker {
            symbol: symbol.into(),
            name: name.into(),
            price_usd: "1.23".into(),
            percent_change_24h: "-0.4".into(),
            market_cap_usd: cap,
            volume_24h: dec!(1000),
        }
    }

    fn fixture() -> Vec<Ticker> {
        vec![
            ticker("BTC", "Bitcoin", dec!(1200000000000)),
            Ticker {
                symbol: "ETH".into(),
                name: "Ethereum".into(),
                price_usd: "3000.5".into(),
                percent_change_24h: "2.1".into(),
                market_cap_usd: dec!(360000000000),
                volume_24h: dec!(15000000000),
            },
            ticker("DOGE", "Dogecoin", dec!(21000000000)),
        ]
    }

    fn lookup_over(tickers: &[Ticker]) -> (PriceLookup, Arc<StaticTickerSource>) {
        let source = Arc::new(StaticTickerSource::new(tickers));
        (PriceLookup::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_every_fixture_symbol_renders() {
        let tickers = fixture();
        let (lookup, _) = lookup_over(&tickers);

        for t in &tickers {
            let text = lookup.lookup_text(&t.symbol.to_lowercase()).await;
            assert!(text.contains(&t.name), "{text}");
            assert!(text.contains(&format!("({})", t.symbol)));
            assert!(text.contains(&format!("`${}`", t.price_usd)));
            assert!(text.contains(&format!("`{}%`", t.percent_change_24h)));
            assert!(text.contains(&crate::format::format_thousands(t.market_cap_usd)));
            assert!(text.contains(&crate::format::format_thousands(t.volume_24h)));
        }
    }

    #[tokio::test]
    async fn test_eth_scenario() {
        let (lookup, _) = lookup_over(&fixture());
        let text = lookup.lookup_text("ETH").await;
        assert!(text.contains("🔢 **Market Cap:** `$360,000,000,000.00`"));
        assert!(text.contains("📊 **Volume (24h):** `$15,000,000,000.00`"));
    }

    #[tokio::test]
    async fn test_case_insensitive_lookups_agree() {
        let (lookup, _) = lookup_over(&fixture());
        let upper = lookup.lookup_text("BTC").await;
        assert_eq!(lookup.lookup_text("btc").await, upper);
        assert_eq!(lookup.lookup_text("Btc").await, upper);
        assert!(upper.starts_with("### Bitcoin (BTC)"));
    }

    #[tokio::test]
    async fn test_absent_symbol() {
        let (lookup, _) = lookup_over(&fixture());
        let text = lookup.lookup_text("SHIB").await;
        assert!(text.contains("SHIB"));
        assert!(!text.contains("**Price:**"));
        assert!(!text.contains('$'));
        assert!(matches!(
            lookup.lookup("SHIB").await,
            Err(LookupError::NotFound(s)) if s == "SHIB"
        ));
    }

    #[tokio::test]
    async fn test_no_partial_matches() {
        let (lookup, _) = lookup_over(&fixture());
        assert!(lookup.lookup("BT").await.unwrap_err().is_not_found());
        assert!(lookup.lookup("ETHEREUM").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let (lookup, _) = lookup_over(&[]);
        assert_eq!(
            lookup.lookup_text("XRP").await,
            "❌ Symbol 'XRP' not found. Try BTC, ETH, etc."
        );
    }

    #[tokio::test]
    async fn test_network_failure_is_text() {
        let lookup = PriceLookup::new(Arc::new(StaticTickerSource::failing(
            "error sending request: connection refused",
        )));
        let text = lookup.lookup_text("BTC").await;
        assert!(text.starts_with("❌ Error fetching data:"));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let tickers = vec![
            ticker("BTC", "Bitcoin", dec!(1)),
            ticker("btc", "Bitcoin Imposter", dec!(2)),
        ];
        let (lookup, _) = lookup_over(&tickers);
        assert_eq!(lookup.lookup("BTC").await.unwrap().name, "Bitcoin");
    }

    #[tokio::test]
    async fn test_malformed_entry_before_match() {
        let source = StaticTickerSource::from_json(
            r#"{"data": [{"name": "No Symbol"}, {"symbol": "BTC", "name": "Bitcoin"}]}"#,
        )
        .unwrap();
        let lookup = PriceLookup::new(Arc::new(source));
        assert_eq!(
            lookup.lookup_text("BTC").await,
            "❌ Error fetching data: missing or malformed field 'symbol'"
        );
    }

    #[tokio::test]
    async fn test_repeat_calls_refetch_and_agree() {
        let (lookup, source) = lookup_over(&fixture());
        let first = lookup.lookup_text("DOGE").await;
        let second = lookup.lookup_text("DOGE").await;
        assert_eq!(first, second);
        assert_eq!(source.fetches(), 2);
    }
}
