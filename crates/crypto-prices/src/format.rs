//! Rendering
//!
//! Turns a lookup outcome into the text the agent hands back. Pure
//! functions, no I/O.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LookupError, Result};
use crate::model::Ticker;

/// Prefix of every failure line
pub const FAILURE_MARK: &str = "❌";

/// Render any lookup outcome; never fails
pub fn render(outcome: &Result<Ticker>) -> String {
    match outcome {
        Ok(ticker) => format_card(ticker),
        Err(LookupError::NotFound(symbol)) => format_not_found(symbol),
        Err(e) => format_failure(e),
    }
}

/// Multi-line summary of one ticker
pub fn format_card(ticker: &Ticker) -> String {
    format!(
        "### {name} ({symbol})\n\
         💲 **Price:** `${price}`\n\
         📈 **Change (24h):** `{change}%`\n\
         🔢 **Market Cap:** `${market_cap}`\n\
         📊 **Volume (24h):** `${volume}`",
        name = ticker.name,
        symbol = ticker.symbol,
        price = ticker.price_usd,
        change = ticker.percent_change_24h,
        market_cap = format_thousands(ticker.market_cap_usd),
        volume = format_thousands(ticker.volume_24h),
    )
}

pub fn format_not_found(symbol: &str) -> String {
    format!("{FAILURE_MARK} Symbol '{symbol}' not found. Try BTC, ETH, etc.")
}

pub fn format_failure(error: &LookupError) -> String {
    format!("{FAILURE_MARK} Error fetching data: {error}")
}

/// Two decimal places with comma thousands separators, e.g. `1,234,567.89`
pub fn format_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn eth() -> Ticker {
        Ticker {
            symbol: "ETH".into(),
            name: "Ethereum".into(),
            price_usd: "3000.5".into(),
            percent_change_24h: "2.1".into(),
            market_cap_usd: dec!(360000000000),
            volume_24h: dec!(15000000000),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(dec!(360000000000)), "360,000,000,000.00");
        assert_eq!(format_thousands(dec!(15000000000)), "15,000,000,000.00");
        assert_eq!(format_thousands(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_thousands(dec!(999.995)), "1,000.00");
        assert_eq!(format_thousands(dec!(100)), "100.00");
        assert_eq!(format_thousands(dec!(0.5)), "0.50");
        assert_eq!(format_thousands(dec!(0)), "0.00");
        assert_eq!(format_thousands(dec!(-1234.5)), "-1,234.50");
        assert_eq!(format_thousands(dec!(-0.001)), "0.00");
    }

    #[test]
    fn test_card() {
        let card = format_card(&eth());
        let lines: Vec<_> = card.lines().collect();
        assert_eq!(
            lines,
            vec![
                "### Ethereum (ETH)",
                "💲 **Price:** `$3000.5`",
                "📈 **Change (24h):** `2.1%`",
                "🔢 **Market Cap:** `$360,000,000,000.00`",
                "📊 **Volume (24h):** `$15,000,000,000.00`",
            ]
        );
    }

    #[test]
    fn test_render_not_found() {
        let rendered = render(&Err(LookupError::NotFound("XRP".into())));
        assert_eq!(rendered, "❌ Symbol 'XRP' not found. Try BTC, ETH, etc.");
    }

    #[test]
    fn test_render_failure_embeds_cause() {
        let rendered = render(&Err(LookupError::MalformedField("volume24")));
        assert_eq!(
            rendered,
            "❌ Error fetching data: missing or malformed field 'volume24'"
        );
        assert!(render(&Err(LookupError::Status(503))).contains("HTTP 503"));
    }
}
