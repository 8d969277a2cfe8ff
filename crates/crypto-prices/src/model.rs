//! Domain Models
//!
//! Ticker records as listed by the remote API. Market cap and volume are
//! `rust_decimal` values; price and 24h change are kept as the API's own
//! decimal strings because they are displayed verbatim.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Result};

/// A matched ticker record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Ticker symbol (e.g., "BTC", "ETH")
    pub symbol: String,

    /// Full name (e.g., "Bitcoin", "Ethereum")
    pub name: String,

    /// Price in USD, as listed
    pub price_usd: String,

    /// 24-hour change percentage, as listed
    pub percent_change_24h: String,

    /// Market capitalization in USD
    pub market_cap_usd: Decimal,

    /// 24-hour trading volume in USD
    pub volume_24h: Decimal,
}

/// Top-level ticker listing document
#[derive(Clone, Debug, Deserialize)]
pub struct TickerListing {
    pub data: Vec<RawTicker>,
}

/// A numeric figure the API sends either as a JSON string or a JSON number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Text(String),
    Number(serde_json::Number),
}

impl Figure {
    /// The figure as it would be displayed
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }

    /// Parse as a decimal, accepting scientific notation
    pub fn to_decimal(&self) -> Option<Decimal> {
        let text = self.as_text();
        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }
}

impl From<&str> for Figure {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One listing entry as received; validated into a `Ticker` only when matched
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTicker {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price_usd: Option<Figure>,
    pub percent_change_24h: Option<Figure>,
    pub market_cap_usd: Option<Figure>,
    pub volume24: Option<Figure>,
}

impl RawTicker {
    /// Case-insensitive symbol equality; an entry without a symbol is malformed
    pub fn matches(&self, symbol: &str) -> Result<bool> {
        let own = self
            .symbol
            .as_deref()
            .ok_or(LookupError::MalformedField("symbol"))?;
        Ok(own.to_uppercase() == symbol.to_uppercase())
    }

    /// Validate every displayed field
    pub fn to_ticker(&self) -> Result<Ticker> {
        fn text(value: Option<&Figure>, field: &'static str) -> Result<String> {
            value
                .map(Figure::as_text)
                .ok_or(LookupError::MalformedField(field))
        }

        fn decimal(value: Option<&Figure>, field: &'static str) -> Result<Decimal> {
            value
                .and_then(Figure::to_decimal)
                .ok_or(LookupError::MalformedField(field))
        }

        Ok(Ticker {
            symbol: self
                .symbol
                .clone()
                .ok_or(LookupError::MalformedField("symbol"))?,
            name: self.name.clone().ok_or(LookupError::MalformedField("name"))?,
            price_usd: text(self.price_usd.as_ref(), "price_usd")?,
            percent_change_24h: text(self.percent_change_24h.as_ref(), "percent_change_24h")?,
            market_cap_usd: decimal(self.market_cap_usd.as_ref(), "market_cap_usd")?,
            volume_24h: decimal(self.volume24.as_ref(), "volume24")?,
        })
    }
}

impl From<&Ticker> for RawTicker {
    fn from(ticker: &Ticker) -> Self {
        Self {
            symbol: Some(ticker.symbol.clone()),
            name: Some(ticker.name.clone()),
            price_usd: Some(Figure::Text(ticker.price_usd.clone())),
            percent_change_24h: Some(Figure::Text(ticker.percent_change_24h.clone())),
            market_cap_usd: Some(Figure::Text(ticker.market_cap_usd.to_string())),
            volume24: Some(Figure::Text(ticker.volume_24h.to_string())),
        }
    }
}

/// A coin offered in the selection menu
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Coin {
    pub label: &'static str,
    pub symbol: &'static str,
}

/// Coins offered for selection
pub const TOP_COINS: [Coin; 6] = [
    Coin { label: "Bitcoin (BTC)", symbol: "BTC" },
    Coin { label: "Ethereum (ETH)", symbol: "ETH" },
    Coin { label: "Dogecoin (DOGE)", symbol: "DOGE" },
    Coin { label: "Solana (SOL)", symbol: "SOL" },
    Coin { label: "Ripple (XRP)", symbol: "XRP" },
    Coin { label: "Litecoin (LTC)", symbol: "LTC" },
];
