//! # agent-runtime
//!
//! Runtime providers for the live price agent.
//!
//! ## Providers
//!
//! - **OpenAI-compatible** (default): any `/chat/completions` endpoint with
//!   bearer auth and native function calling (Gemini, OpenAI, local gateways)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::openai::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env()?;
//! let agent = Agent::new(Arc::new(provider), Arc::new(tools), AgentConfig::default());
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, ExecutionContext, LlmProvider, Message, Result, Role, Tool, ToolRegistry,
};
