//! LLM stage execution with a bounded tool-calling loop.

use super::roster::AgentSpec;
use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::error::{OppsumError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Runs one pipeline stage for a given agent.
///
/// The pipeline depends only on this trait, which keeps it testable without
/// an API key.
#[async_trait]
pub trait StageRunner: Send + Sync {
    /// Execute a stage: the agent's persona plus instructions, with prior
    /// stage outputs as optional context. Returns the stage's text output.
    async fn run_stage(
        &self,
        agent: &AgentSpec,
        instructions: &str,
        context: Option<&str>,
    ) -> Result<String>;
}

/// Stage runner backed by the OpenAI chat API.
pub struct OpenAiStageRunner {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    tools: ToolContext,
    max_iterations: usize,
}

impl OpenAiStageRunner {
    /// Create a new runner with the shared LLM configuration.
    pub fn new(model: &str, temperature: f32, tools: ToolContext, max_iterations: usize) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
            tools,
            max_iterations,
        }
    }

    /// Execute a single tool call and return the result text for the model.
    ///
    /// Tool failures are fed back to the model as error text rather than
    /// aborting the chat turn; the stage still fails if the model never
    /// produces a final answer.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> String {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        }
    }
}

#[async_trait]
impl StageRunner for OpenAiStageRunner {
    async fn run_stage(
        &self,
        agent: &AgentSpec,
        instructions: &str,
        context: Option<&str>,
    ) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(agent.system_prompt())
                .build()
                .map_err(|e| OppsumError::Agent(e.to_string()))?
                .into(),
        ];

        let user_message = match context {
            Some(ctx) => format!("Context:\n{}\n\nTask: {}", ctx, instructions),
            None => format!("Task: {}", instructions),
        };

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()
                .map_err(|e| OppsumError::Agent(e.to_string()))?
                .into(),
        );

        let definitions = tool_definitions(&agent.tools);
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(OppsumError::Agent(format!(
                    "Agent '{}' exceeded maximum iterations ({})",
                    agent.role, self.max_iterations
                )));
            }

            debug!("Agent '{}' iteration {}", agent.role, iterations);

            let mut builder = CreateChatCompletionRequestArgs::default();
            builder
                .model(&self.model)
                .temperature(self.temperature)
                .messages(messages.clone());
            if !definitions.is_empty() {
                builder.tools(definitions.clone());
            }
            let request = builder
                .build()
                .map_err(|e| OppsumError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| OppsumError::OpenAI(e.to_string()))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| OppsumError::Agent("No response from model".to_string()))?;

            match &choice.message.tool_calls {
                Some(tool_calls) if !tool_calls.is_empty() => {
                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()
                        .map_err(|e| OppsumError::Agent(e.to_string()))?;
                    messages.push(assistant_msg.into());

                    for tool_call in tool_calls {
                        let result = self.execute_tool_call(tool_call).await;

                        let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(&tool_call.id)
                            .content(result)
                            .build()
                            .map_err(|e| OppsumError::Agent(e.to_string()))?;
                        messages.push(tool_msg.into());
                    }
                }
                _ => {
                    // No tool calls means the model is done with this stage.
                    return choice
                        .message
                        .content
                        .clone()
                        .filter(|c| !c.trim().is_empty())
                        .ok_or_else(|| {
                            OppsumError::Agent("Empty response from model".to_string())
                        });
                }
            }
        }
    }
}
