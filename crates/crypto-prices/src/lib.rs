//! # crypto-prices
//!
//! Live cryptocurrency prices through a tool-calling agent.
//!
//! ## Flow
//!
//! ```text
//! "Get me the live price of ETH"
//!        │
//!        ▼
//! ┌──────────────┐  get_crypto_price(ETH)  ┌───────────────┐  GET /tickers  ┌──────────┐
//! │  PriceAgent  │ ──────────────────────▶ │ PriceLookup   │ ─────────────▶ │ CoinLore │
//! │ (LLM + tool) │ ◀────────────────────── │ scan + render │ ◀───────────── │          │
//! └──────────────┘     formatted card      └───────────────┘   full list    └──────────┘
//! ```
//!
//! The tool never raises: a listed symbol becomes a card, a missing one a
//! "not found" line, and any fetch or decode fault an error line.

pub mod agent;
pub mod error;
pub mod format;
pub mod lookup;
pub mod model;
pub mod svckit;
pub mod ticker;

pub use agent::{price_prompt, PriceAgent, PriceAgentConfig, PriceCard, CRYPTO_AGENT_PROMPT};
pub use error::{LookupError, Result};
pub use format::{format_thousands, render};
pub use lookup::{find_ticker, PriceLookup};
pub use model::{Coin, RawTicker, Ticker, TOP_COINS};
pub use ticker::{CoinLoreClient, StaticTickerSource, TickerSource, DEFAULT_TICKER_URL};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::PriceLookupTool;
}

/// Shown when a price request names no coins
pub const NO_SELECTION_WARNING: &str = "Please select at least one coin.";
