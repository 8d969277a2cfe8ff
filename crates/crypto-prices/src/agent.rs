//! Price Agent
//!
//! The agent invocation shim: one immutable agent built at process scope,
//! one fresh `ExecutionContext` per call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use agent_core::{
    Agent, AgentConfig, ExecutionContext, GenerationOptions, LlmProvider, Result, ToolRegistry,
    ToolUseBehavior,
};

use crate::lookup::PriceLookup;
use crate::svckit::PriceLookupTool;
use crate::ticker::TickerSource;

/// Instructions for the price agent
pub const CRYPTO_AGENT_PROMPT: &str = "You are a crypto assistant. When the user mentions a \
symbol like BTC, ETH, etc., always use the get_crypto_price tool to fetch the live price from \
the CoinLore API. Do not ask questions; just provide the data.";

/// Prompt sent for one selected symbol
pub fn price_prompt(symbol: &str) -> String {
    format!("Get me the live price of {symbol}")
}

/// Immutable agent configuration
#[derive(Clone, Debug)]
pub struct PriceAgentConfig {
    pub name: String,
    pub instructions: String,
    pub generation: GenerationOptions,
    pub max_iterations: usize,
    pub tool_use: ToolUseBehavior,
}

impl Default for PriceAgentConfig {
    fn default() -> Self {
        Self {
            name: "CryptoDataAgent".into(),
            instructions: CRYPTO_AGENT_PROMPT.into(),
            generation: GenerationOptions::default(),
            max_iterations: 10,
            tool_use: ToolUseBehavior::StopOnFirstTool,
        }
    }
}

impl PriceAgentConfig {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.generation.model = model.into();
        self
    }

    #[must_use]
    pub const fn with_tool_use(mut self, behavior: ToolUseBehavior) -> Self {
        self.tool_use = behavior;
        self
    }
}

/// One rendered price result
#[derive(Clone, Debug, Serialize)]
pub struct PriceCard {
    pub symbol: String,
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

/// Agent whose only capability is the price lookup tool
pub struct PriceAgent {
    agent: Agent,
}

impl PriceAgent {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        source: Arc<dyn TickerSource>,
        config: PriceAgentConfig,
    ) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(PriceLookupTool::new(PriceLookup::new(source)));

        let agent = Agent::new(
            provider,
            Arc::new(tools),
            AgentConfig {
                name: config.name,
                system_prompt: config.instructions,
                max_iterations: config.max_iterations,
                generation: config.generation,
                inject_tool_descriptions: true,
                tool_use: config.tool_use,
            },
        );

        Self { agent }
    }

    /// Run the agent once on `prompt` and return its final text.
    ///
    /// Blocks the calling thread. Model-run faults propagate; lookup misses
    /// and tool faults arrive as text.
    pub fn run_agent(&self, prompt: &str) -> Result<String> {
        let context = ExecutionContext::acquire()?;
        let output = context.run(self.agent.ask(prompt))??;

        if !output.passed_through_tool() {
            tracing::warn!(
                run_id = %context.id(),
                agent = %self.agent.config().name,
                tool_calls = output.tool_results.len(),
                "Final output is not a verbatim tool result"
            );
        }

        tracing::debug!(
            run_id = %context.id(),
            iterations = output.iterations,
            "Price agent finished"
        );
        Ok(output.final_output)
    }

    /// One agent run per symbol, strictly in order
    pub fn live_prices<S: AsRef<str>>(&self, symbols: &[S]) -> Result<Vec<PriceCard>> {
        symbols
            .iter()
            .map(|symbol| {
                let symbol = symbol.as_ref();
                let content = self.run_agent(&price_prompt(symbol))?;
                Ok(PriceCard {
                    symbol: symbol.to_string(),
                    content,
                    fetched_at: Utc::now(),
                })
            })
            .collect()
    }

    pub const fn config(&self) -> &AgentConfig {
        self.agent.config()
    }
}
