//! Server Configuration
//!
//! Everything comes from the process environment (optionally seeded from
//! `.env`). The model credential is mandatory; the server refuses to start
//! without it.

use agent_core::{AgentError, Result, ToolUseBehavior};
use agent_runtime::OpenAiConfig;
use crypto_prices::DEFAULT_TICKER_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Model endpoint and credential
    pub llm: OpenAiConfig,

    /// Model id
    pub model: String,

    /// Ticker listing endpoint
    pub ticker_url: String,

    /// Return the tool's text verbatim instead of letting the model rephrase it
    pub tool_passthrough: bool,
}

impl ServerConfig {
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let llm = OpenAiConfig::from_vars(&lookup)?;

        let tool_passthrough = match lookup("TOOL_PASSTHROUGH") {
            None => true,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AgentError::Config(format!("TOOL_PASSTHROUGH must be true or false, got '{raw}'"))
            })?,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            llm,
            model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            ticker_url: lookup("TICKER_URL").unwrap_or_else(|| DEFAULT_TICKER_URL.into()),
            tool_passthrough,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub const fn tool_use(&self) -> ToolUseBehavior {
        if self.tool_passthrough {
            ToolUseBehavior::StopOnFirstTool
        } else {
            ToolUseBehavior::RunLlmAgain
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
