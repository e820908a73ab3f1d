use async_trait::async_trait;
use oppsum::agent::{AgentSpec, StageRunner};
use oppsum::{OppsumError, Result};
use std::sync::{Arc, Mutex};

/// A recorded stage invocation.
#[derive(Debug, Clone)]
pub struct StageCall {
    pub role: String,
    pub instructions: String,
    pub context: Option<String>,
}

/// Stage runner that replays a fixed script of outputs.
#[derive(Clone)]
pub struct MockStageRunner {
    outputs: Vec<String>,
    /// When set, the stage at this index (0-based) fails with the message.
    fail_at: Option<(usize, String)>,
    pub calls: Arc<Mutex<Vec<StageCall>>>,
}

impl MockStageRunner {
    pub fn new(outputs: &[&str]) -> Self {
        Self {
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            fail_at: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_at(outputs: &[&str], index: usize, message: &str) -> Self {
        Self {
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            fail_at: Some((index, message.to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl StageRunner for MockStageRunner {
    async fn run_stage(
        &self,
        agent: &AgentSpec,
        instructions: &str,
        context: Option<&str>,
    ) -> Result<String> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(StageCall {
            role: agent.role.clone(),
            instructions: instructions.to_string(),
            context: context.map(|c| c.to_string()),
        });

        if let Some((fail_index, ref message)) = self.fail_at {
            if index == fail_index {
                return Err(OppsumError::Agent(message.clone()));
            }
        }

        self.outputs
            .get(index)
            .cloned()
            .ok_or_else(|| OppsumError::Agent(format!("No scripted output for stage {}", index)))
    }
}
