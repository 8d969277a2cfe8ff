//! Scripted Mock Provider
//!
//! For testing and demo purposes. Replays a fixed list of completions in
//! order and records every conversation it was asked to complete.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{Completion, GenerationOptions, LlmProvider, ModelInfo, ProviderInfo};
use crate::tool::ToolSchema;

/// One scripted step: either a completion or an error to raise
pub type Scripted = std::result::Result<Completion, String>;

/// Mock provider replaying scripted completions
pub struct MockProvider {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Vec<Message>>>,
    native_tools: bool,
}

impl MockProvider {
    pub fn new(script: impl IntoIterator<Item = Completion>) -> Self {
        Self::with_script(script.into_iter().map(Ok))
    }

    /// Script that may contain provider failures
    pub fn with_script(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            native_tools: true,
        }
    }

    /// Pretend the backend has no native function calling
    #[must_use]
    pub const fn without_native_tools(mut self) -> Self {
        self.native_tools = false;
        self
    }

    /// Number of completions served so far
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Conversations sent to `complete`, in order
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn info(&self) -> Result<ProviderInfo> {
        Ok(ProviderInfo {
            name: "Mock".into(),
            endpoint: None,
            models: self.list_models().await?,
            supports_tools: self.native_tools,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        _tools: &[ToolSchema],
        _options: &GenerationOptions,
    ) -> Result<Completion> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(messages.to_vec());

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Ok(completion)) => Ok(completion),
            Some(Err(msg)) => Err(AgentError::Provider(msg)),
            None => Err(AgentError::Provider("mock script exhausted".into())),
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(vec![ModelInfo {
            id: "mock".into(),
            owned_by: None,
        }])
    }

    fn supports_tools(&self) -> bool {
        self.native_tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let mock = MockProvider::with_script([
            Ok(Completion::text("first", "mock")),
            Err("boom".to_string()),
        ]);
        let opts = GenerationOptions::default();
        let msgs = [Message::user("hi")];

        let first = mock.complete(&msgs, &[], &opts).await.unwrap();
        assert_eq!(first.content, "first");
        assert!(matches!(
            mock.complete(&msgs, &[], &opts).await,
            Err(AgentError::Provider(m)) if m == "boom"
        ));
        assert!(mock.complete(&msgs, &[], &opts).await.is_err());
        assert_eq!(mock.calls(), 3);
    }
}
