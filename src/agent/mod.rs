//! Agent personas and LLM stage execution.
//!
//! An agent here is a fixed configuration record (role, goal, backstory,
//! tool bindings) consumed by the stage runner; there is no per-request
//! agent state.

mod roster;
mod runner;
mod tools;

pub use roster::{AgentRole, AgentSpec, Roster};
pub use runner::{OpenAiStageRunner, StageRunner};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext, ToolName};
