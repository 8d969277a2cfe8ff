//! Price Lookup Tool
//!
//! Exposes `PriceLookup` to the agent as `get_crypto_price`. Misses and
//! faults come back as text inside a failed `ToolResult`, never as an error,
//! because the model reads the output as conversation.

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema, AgentError, Result as CoreResult, Tool, ToolCall, ToolResult,
    ToolSchema,
};

use crate::lookup::PriceLookup;

/// Name the model calls the tool by
pub const TOOL_NAME: &str = "get_crypto_price";

/// Tool for looking up a live cryptocurrency price
pub struct PriceLookupTool {
    lookup: PriceLookup,
}

impl PriceLookupTool {
    pub const fn new(lookup: PriceLookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Tool for PriceLookupTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.into(),
            description: "Gets live crypto price for a given symbol like BTC, ETH. Returns name, \
                          price, 24h change, market cap and 24h volume."
                .into(),
            parameters: vec![ParameterSchema {
                name: "symbol".into(),
                param_type: "string".into(),
                description: "Ticker symbol, e.g. 'BTC'".into(),
                required: true,
            }],
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let symbol = call
            .str_arg("symbol")
            .ok_or_else(|| AgentError::ToolValidation("symbol must be a string".into()))?;

        let outcome = self.lookup.lookup(symbol).await;
        let output = self.lookup.describe(symbol, &outcome);

        Ok(match outcome {
            Ok(ticker) => {
                let data = serde_json::to_value(&ticker)?;
                ToolResult::success(TOOL_NAME, output).with_data(data)
            }
            Err(_) => ToolResult::failure(TOOL_NAME, output),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::Ticker;
    use crate::ticker::StaticTickerSource;

    fn tool(source: StaticTickerSource) -> PriceLookupTool {
        PriceLookupTool::new(PriceLookup::new(Arc::new(source)))
    }

    fn call(symbol: serde_json::Value) -> ToolCall {
        let mut args = HashMap::new();
        args.insert("symbol".to_string(), symbol);
        ToolCall::new(TOOL_NAME, args)
    }

    fn sol() -> Ticker {
        Ticker {
            symbol: "SOL".into(),
            name: "Solana".into(),
            price_usd: "145.20".into(),
            percent_change_24h: "4.2".into(),
            market_cap_usd: dec!(67000000000.456),
            volume_24h: dec!(2500000000),
        }
    }

    #[tokio::test]
    async fn test_hit_carries_data() {
        let result = tool(StaticTickerSource::new(&[sol()]))
            .execute(&call(serde_json::json!("sol")))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("`$67,000,000,000.46`"));
        assert_eq!(result.data.unwrap()["name"], "Solana");
    }

    #[tokio::test]
    async fn test_miss_and_fault_are_text() {
        let miss = tool(StaticTickerSource::new(&[sol()]))
            .execute(&call(serde_json::json!("LTC")))
            .await
            .unwrap();
        assert!(!miss.success);
        assert_eq!(miss.output, "❌ Symbol 'LTC' not found. Try BTC, ETH, etc.");

        let fault = tool(StaticTickerSource::failing("dns error"))
            .execute(&call(serde_json::json!("BTC")))
            .await
            .unwrap();
        assert!(!fault.success);
        assert_eq!(fault.output, "❌ Error fetching data: dns error");
    }

    #[tokio::test]
    async fn test_output_matches_lookup_text() {
        for source in [
            StaticTickerSource::new(&[sol()]),
            StaticTickerSource::failing("connection reset"),
        ] {
            let lookup = PriceLookup::new(Arc::new(source));
            let tool = PriceLookupTool::new(lookup.clone());
            for symbol in ["SOL", "doge"] {
                let result = tool.execute(&call(serde_json::json!(symbol))).await.unwrap();
                assert_eq!(result.output, lookup.lookup_text(symbol).await);
            }
        }
    }

    #[tokio::test]
    async fn test_non_string_symbol() {
        let result = tool(StaticTickerSource::new(&[]))
            .execute(&call(serde_json::json!(42)))
            .await;
        assert!(matches!(result, Err(AgentError::ToolValidation(_))));
    }

    #[test]
    fn test_schema() {
        let schema = tool(StaticTickerSource::new(&[])).schema();
        assert_eq!(schema.name, "get_crypto_price");
        assert!(schema.parameters[0].required);
    }
}
