//! Tool definitions and implementations for the agent stage runner.

use crate::error::{OppsumError, Result};
use crate::transcript::{extract_video_id, flatten_segments, TranscriptSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Names of tools an agent may be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    FetchTranscript,
}

/// A parsed tool invocation from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Fetch the transcript of a YouTube video from its link.
    FetchTranscript { link: String },
}

/// Tool execution context with access to the transcript source.
pub struct ToolContext {
    source: Arc<dyn TranscriptSource>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::FetchTranscript { link } => self.execute_fetch_transcript(link).await,
        }
    }

    async fn execute_fetch_transcript(&self, link: &str) -> Result<String> {
        let video_id = extract_video_id(link)?;
        info!("Fetching transcript for video {}", video_id);

        let segments = self.source.fetch(&video_id).await?;
        Ok(flatten_segments(&segments))
    }
}

/// Get OpenAI function/tool definitions for the given tool bindings.
pub fn tool_definitions(tools: &[ToolName]) -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    tools
        .iter()
        .map(|tool| match tool {
            ToolName::FetchTranscript => ChatCompletionTool {
                r#type: ChatCompletionToolType::Function,
                function: FunctionObject {
                    name: "fetch_transcript".to_string(),
                    description: Some(
                        "Fetch the transcript of a YouTube video using the provided link."
                            .to_string(),
                    ),
                    parameters: Some(serde_json::json!({
                        "type": "object",
                        "properties": {
                            "link": {
                                "type": "string",
                                "description": "The YouTube video URL"
                            }
                        },
                        "required": ["link"]
                    })),
                    strict: None,
                },
            },
        })
        .collect()
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| OppsumError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "fetch_transcript" => {
            let link = args["link"]
                .as_str()
                .ok_or_else(|| OppsumError::Agent("Missing 'link' argument".to_string()))?
                .to_string();
            Ok(ToolCall::FetchTranscript { link })
        }
        _ => Err(OppsumError::Agent(format!("Unknown tool: {}", name))),
    }
}
