//! The fixed four-stage summarization pipeline.
//!
//! Stages run strictly in sequence; every stage's text output is appended to
//! a shared context that later stages receive. There are no branches, no
//! retries, and no partial results: the first failing stage aborts the run.

use crate::agent::{AgentRole, Roster, StageRunner};
use crate::config::{Prompts, StagePrompts};
use crate::error::Result;
use std::collections::HashMap;
use tracing::info;

/// One pipeline stage: instruction template, expected output, assigned agent.
///
/// Instruction templates may reference `{{youtube_link}}`, rendered once per
/// run.
#[derive(Debug, Clone)]
pub struct StageSpec {
    pub name: &'static str,
    pub instructions: String,
    pub expected_output: String,
    pub agent: AgentRole,
}

/// Build the ordered stage list from stage prompts.
pub fn build_stages(prompts: &StagePrompts) -> Vec<StageSpec> {
    vec![
        StageSpec {
            name: "fetch_transcript",
            instructions: prompts.fetch_transcript.instructions.clone(),
            expected_output: prompts.fetch_transcript.expected_output.clone(),
            agent: AgentRole::Summarizer,
        },
        StageSpec {
            name: "outline",
            instructions: prompts.outline.instructions.clone(),
            expected_output: prompts.outline.expected_output.clone(),
            agent: AgentRole::Planner,
        },
        StageSpec {
            name: "summarize",
            instructions: prompts.summarize.instructions.clone(),
            expected_output: prompts.summarize.expected_output.clone(),
            agent: AgentRole::Summarizer,
        },
        StageSpec {
            name: "edit",
            instructions: prompts.edit.instructions.clone(),
            expected_output: prompts.edit.expected_output.clone(),
            agent: AgentRole::Editor,
        },
    ]
}

/// The sequential pipeline: a roster of personas plus an ordered stage list.
///
/// Immutable after construction; shared read-only across concurrent runs.
pub struct Pipeline {
    roster: Roster,
    stages: Vec<StageSpec>,
}

impl Pipeline {
    pub fn new(roster: Roster, stages: Vec<StageSpec>) -> Self {
        Self { roster, stages }
    }

    /// Run every stage in order for one video link.
    ///
    /// Returns the final stage's text output. Stage errors propagate
    /// unchanged.
    pub async fn run(&self, runner: &dyn StageRunner, youtube_link: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("youtube_link".to_string(), youtube_link.to_string());

        let mut context = String::new();
        let mut last_output = String::new();

        for stage in &self.stages {
            info!("Running stage '{}'", stage.name);

            let instructions = format!(
                "{}\n\nExpected output: {}",
                Prompts::render(&stage.instructions, &vars),
                stage.expected_output
            );

            let agent = self.roster.agent(stage.agent);
            let stage_context = if context.is_empty() {
                None
            } else {
                Some(context.as_str())
            };

            let output = runner.run_stage(agent, &instructions, stage_context).await?;

            context.push_str(&format!("[{}]\n{}\n\n", stage.name, output));
            last_output = output;
        }

        Ok(last_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentSpec;
    use crate::config::Personas;
    use crate::error::OppsumError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Runner that answers each stage from a fixed script.
    struct ScriptedRunner {
        outputs: Vec<&'static str>,
        calls: Mutex<Vec<(String, String, Option<String>)>>,
    }

    impl ScriptedRunner {
        fn new(outputs: Vec<&'static str>) -> Self {
            Self {
                outputs,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StageRunner for ScriptedRunner {
        async fn run_stage(
            &self,
            agent: &AgentSpec,
            instructions: &str,
            context: Option<&str>,
        ) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push((
                agent.role.clone(),
                instructions.to_string(),
                context.map(|c| c.to_string()),
            ));
            self.outputs
                .get(index)
                .map(|s| s.to_string())
                .ok_or_else(|| OppsumError::Agent("Unexpected extra stage".to_string()))
        }
    }

    fn pipeline() -> Pipeline {
        let prompts = Prompts::default();
        Pipeline::new(
            Roster::from_personas(&prompts.personas),
            build_stages(&prompts.stages),
        )
    }

    #[test]
    fn test_build_stages_order_and_agents() {
        let stages = build_stages(&Prompts::default().stages);

        let names: Vec<_> = stages.iter().map(|s| s.name).collect();
        assert_eq!(names, ["fetch_transcript", "outline", "summarize", "edit"]);

        assert_eq!(stages[0].agent, AgentRole::Summarizer);
        assert_eq!(stages[1].agent, AgentRole::Planner);
        assert_eq!(stages[2].agent, AgentRole::Summarizer);
        assert_eq!(stages[3].agent, AgentRole::Editor);
    }

    #[tokio::test]
    async fn test_run_returns_final_stage_output() {
        let runner = ScriptedRunner::new(vec!["transcript", "outline", "summary", "final edit"]);

        let result = pipeline()
            .run(&runner, "https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(result, "final edit");
    }

    #[tokio::test]
    async fn test_run_renders_link_and_accumulates_context() {
        let runner = ScriptedRunner::new(vec!["transcript", "outline", "summary", "edited"]);

        pipeline()
            .run(&runner, "https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 4);

        // First stage gets the rendered link and no context
        assert!(calls[0].1.contains("https://youtu.be/dQw4w9WgXcQ"));
        assert!(calls[0].2.is_none());

        // Later stages see every prior output
        let edit_context = calls[3].2.as_ref().unwrap();
        assert!(edit_context.contains("transcript"));
        assert!(edit_context.contains("outline"));
        assert!(edit_context.contains("summary"));
    }

    #[tokio::test]
    async fn test_run_aborts_on_stage_failure() {
        // Script runs out after two stages, so stage three errors
        let runner = ScriptedRunner::new(vec!["transcript", "outline"]);

        let err = pipeline()
            .run(&runner, "https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, OppsumError::Agent(_)));

        // The failing stage was the last one attempted
        assert_eq!(runner.calls.lock().unwrap().len(), 3);
    }
}
