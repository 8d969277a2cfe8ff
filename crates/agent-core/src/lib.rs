//! # agent-core
//!
//! Core agent logic with provider-agnostic LLM abstraction and extensible tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ExecutionContext (one per run)               │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Reasoning  │  │    Tools    │  │   LlmProvider       │  │
//! │  │    Loop     │──│   Registry  │──│   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between any chat-completions
//! endpoint or the scripted `MockProvider` without changing agent logic.

pub mod context;
pub mod error;
pub mod message;
pub mod mock;
pub mod provider;
pub mod reasoning;
pub mod tool;

pub use context::{ExecutionContext, RunId};
pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use mock::MockProvider;
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use reasoning::{Agent, AgentConfig, RunOutput, ToolUseBehavior};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
