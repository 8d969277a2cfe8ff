//! Reasoning Loop
//!
//! Implements the ReAct (Reason + Act) pattern for agent behavior.
//! The agent observes, thinks, acts (via tools), and responds. Every step
//! is sequential: one completion, then each requested tool in order, then
//! the next completion.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message, Role};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{ToolCall, ToolRegistry, ToolResult, ToolSchema};

/// What happens after a tool returns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolUseBehavior {
    /// Feed tool output back to the model and let it write the final answer
    #[default]
    RunLlmAgain,
    /// The first tool output is the final answer, verbatim
    StopOnFirstTool,
}

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Agent name, used in logs
    pub name: String,

    /// System prompt
    pub system_prompt: String,

    /// Maximum reasoning iterations before giving up
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Whether to fall back to prompt-injected tool descriptions when the
    /// provider has no native function calling
    pub inject_tool_descriptions: bool,

    /// Tool output handling
    pub tool_use: ToolUseBehavior,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "Agent".into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
            inject_tool_descriptions: true,
            tool_use: ToolUseBehavior::default(),
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r"You are a helpful AI assistant.

After receiving tool results, synthesize them into a helpful response.
If you can answer directly without tools, do so.
Be concise and accurate.";

/// Outcome of one agent run
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// Text handed back to the caller
    pub final_output: String,

    /// Every tool result produced during the run, in execution order
    pub tool_results: Vec<ToolResult>,

    /// Completions requested from the provider
    pub iterations: usize,
}

impl RunOutput {
    /// Whether the final output is exactly one of the tool outputs
    pub fn passed_through_tool(&self) -> bool {
        self.tool_results
            .iter()
            .any(|r| r.output.trim() == self.final_output.trim())
    }
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    fn text_protocol_active(&self) -> bool {
        self.config.inject_tool_descriptions
            && !self.provider.supports_tools()
            && !self.tools.is_empty()
    }

    /// Build the full system prompt, including tool descriptions for
    /// providers without native function calling
    fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if self.text_protocol_active() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.tools.generate_prompt_section());
        }

        prompt
    }

    /// Run the agent over a conversation until it produces a final answer
    pub async fn run(&self, conversation: &mut Conversation) -> Result<RunOutput> {
        if conversation.messages().first().map(|m| m.role) != Some(Role::System) {
            conversation
                .messages_mut()
                .insert(0, Message::system(self.build_system_prompt()));
        }

        let schemas: Vec<ToolSchema> = if self.provider.supports_tools() {
            self.tools.schemas()
        } else {
            Vec::new()
        };

        let mut tool_results = Vec::new();

        for iteration in 1..=self.config.max_iterations {
            let completion = self
                .provider
                .complete(conversation.messages(), &schemas, &self.config.generation)
                .await?;

            let native = !completion.tool_calls.is_empty();
            let calls = if native {
                completion.tool_calls.clone()
            } else if self.text_protocol_active() {
                parse_tool_call(&completion.content).into_iter().collect()
            } else {
                Vec::new()
            };

            conversation.push(
                Message::assistant(&completion.content)
                    .with_tool_calls(completion.tool_calls)
                    .with_model(completion.model),
            );

            if calls.is_empty() {
                if completion.content.trim().is_empty() {
                    return Err(AgentError::EmptyResponse);
                }
                return Ok(RunOutput {
                    final_output: completion.content,
                    tool_results,
                    iterations: iteration,
                });
            }

            for call in &calls {
                tracing::debug!(agent = %self.config.name, tool = %call.name, "Executing tool");

                let result = self.execute_tool(call).await;

                let tool_message = if native {
                    result.output.clone()
                } else {
                    Self::format_tool_result(&result)
                };
                conversation.push(Message::tool(tool_message, call.id.clone()));

                if self.config.tool_use == ToolUseBehavior::StopOnFirstTool {
                    let final_output = result.output.clone();
                    tool_results.push(result);
                    return Ok(RunOutput {
                        final_output,
                        tool_results,
                        iterations: iteration,
                    });
                }

                tool_results.push(result);
            }
        }

        Err(AgentError::MaxIterations(self.config.max_iterations))
    }

    /// Run with a simple string input (creates temporary conversation)
    pub async fn ask(&self, question: &str) -> Result<RunOutput> {
        let mut conversation = Conversation::with_system_prompt(self.build_system_prompt());
        conversation.push(Message::user(question));
        self.run(&mut conversation).await
    }

    /// Execute a tool call; registry errors become a failed result for the model to read
    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        match self.tools.execute(call).await {
            Ok(mut result) => {
                result.id.clone_from(&call.id);
                result
            }
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "Tool call failed");
                ToolResult {
                    name: call.name.clone(),
                    id: call.id.clone(),
                    success: false,
                    output: format!("Error: {e}"),
                    data: None,
                }
            }
        }
    }

    /// Format tool result for the prompt-injected tool protocol
    fn format_tool_result(result: &ToolResult) -> String {
        if result.success {
            format!("[Tool '{}' returned]\n{}", result.name, result.output)
        } else {
            format!("[Tool '{}' failed]\n{}", result.name, result.output)
        }
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Parse a fenced ```tool block, falling back to a bare JSON object with a "tool" key
fn parse_tool_call(content: &str) -> Option<ToolCall> {
    const TOOL_START: &str = "```tool";
    const TOOL_END: &str = "```";

    let parsed = content.find(TOOL_START).and_then(|start_idx| {
        let after_marker = &content[start_idx + TOOL_START.len()..];
        let end_idx = after_marker.find(TOOL_END)?;
        serde_json::from_str::<ToolCall>(after_marker[..end_idx].trim()).ok()
    });

    parsed.or_else(|| parse_inline_tool_call(content)).map(|mut call| {
        if call.id.is_none() {
            call.id = Some(uuid::Uuid::new_v4().to_string());
        }
        call
    })
}

fn parse_inline_tool_call(content: &str) -> Option<ToolCall> {
    if !content.contains(r#""tool""#) {
        return None;
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;

    if end <= start {
        return None;
    }

    serde_json::from_str::<ToolCall>(&content[start..=end]).ok()
}
