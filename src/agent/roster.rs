//! The fixed roster of agent personas.

use super::tools::ToolName;
use crate::config::Personas;

/// Which persona a pipeline stage is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRole {
    Planner,
    Summarizer,
    Editor,
}

/// Immutable persona descriptor: role, goal, backstory, tool bindings.
///
/// Built once at orchestrator construction and shared read-only across runs.
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<ToolName>,
}

impl AgentSpec {
    /// Compose the system prompt sent to the model for this persona.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}.\n\nYour goal: {goal}\n\nBackstory: {backstory}",
            role = self.role,
            goal = self.goal,
            backstory = self.backstory
        )
    }

    /// Whether this agent may invoke the given tool.
    pub fn has_tool(&self, tool: ToolName) -> bool {
        self.tools.contains(&tool)
    }
}

/// The three personas used by the pipeline.
#[derive(Debug, Clone)]
pub struct Roster {
    planner: AgentSpec,
    summarizer: AgentSpec,
    editor: AgentSpec,
}

impl Roster {
    /// Build the roster from persona prompts.
    ///
    /// The summarizer is the only agent bound to the transcript tool.
    pub fn from_personas(personas: &Personas) -> Self {
        Self {
            planner: AgentSpec {
                role: personas.planner.role.clone(),
                goal: personas.planner.goal.clone(),
                backstory: personas.planner.backstory.clone(),
                tools: Vec::new(),
            },
            summarizer: AgentSpec {
                role: personas.summarizer.role.clone(),
                goal: personas.summarizer.goal.clone(),
                backstory: personas.summarizer.backstory.clone(),
                tools: vec![ToolName::FetchTranscript],
            },
            editor: AgentSpec {
                role: personas.editor.role.clone(),
                goal: personas.editor.goal.clone(),
                backstory: personas.editor.backstory.clone(),
                tools: Vec::new(),
            },
        }
    }

    /// Look up the persona for a role.
    pub fn agent(&self, role: AgentRole) -> &AgentSpec {
        match role {
            AgentRole::Planner => &self.planner,
            AgentRole::Summarizer => &self.summarizer,
            AgentRole::Editor => &self.editor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_tool_bindings() {
        let roster = Roster::from_personas(&Personas::default());

        assert!(roster
            .agent(AgentRole::Summarizer)
            .has_tool(ToolName::FetchTranscript));
        assert!(!roster.agent(AgentRole::Planner).has_tool(ToolName::FetchTranscript));
        assert!(!roster.agent(AgentRole::Editor).has_tool(ToolName::FetchTranscript));
    }

    #[test]
    fn test_system_prompt_contains_persona() {
        let roster = Roster::from_personas(&Personas::default());
        let prompt = roster.agent(AgentRole::Editor).system_prompt();

        assert!(prompt.contains("Editor & Fact Checker"));
        assert!(prompt.contains("meticulous editor"));
    }
}
