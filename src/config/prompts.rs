//! Prompt templates for the agent personas and pipeline stages.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory (`personas.toml`, `stages.toml`). Stage instructions may use
//! `{{youtube_link}}`, rendered per run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub personas: Personas,
    pub stages: StagePrompts,
}

/// The three fixed personas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Personas {
    pub planner: PersonaPrompt,
    pub summarizer: PersonaPrompt,
    pub editor: PersonaPrompt,
}

/// Role, goal, and backstory of one persona.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersonaPrompt {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Default for Personas {
    fn default() -> Self {
        Self {
            planner: PersonaPrompt {
                role: "Content Planner".to_string(),
                goal: "Create a clear outline of the YouTube video transcript with relevant \
                       headings and subheadings."
                    .to_string(),
                backstory: "You are an expert content strategist who specializes in extracting \
                            the structure and key talking points from transcripts to make them \
                            easy to digest as outlines."
                    .to_string(),
            },
            summarizer: PersonaPrompt {
                role: "YouTube Video Summarizer".to_string(),
                goal: "Summarize the YouTube transcript into a clear, structured summary with \
                       required headings and subheadings."
                    .to_string(),
                backstory: "You specialize in condensing long YouTube transcripts into readable \
                            summaries. You emphasize clarity, brevity, and proper formatting."
                    .to_string(),
            },
            editor: PersonaPrompt {
                role: "Editor & Fact Checker".to_string(),
                goal: "Proofread and fact-check the final summary against the transcript. \
                       Ensure grammar, spelling, and structure are correct, and validate that \
                       all key points in the transcript are accurately represented."
                    .to_string(),
                backstory: "You are a meticulous editor with a keen eye for detail. You check \
                            not only for readability but also for accuracy, ensuring the \
                            summary faithfully reflects the transcript."
                    .to_string(),
            },
        }
    }
}

/// Instruction template and expected output of one pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StagePrompt {
    pub instructions: String,
    pub expected_output: String,
}

/// The four fixed pipeline stages, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StagePrompts {
    pub fetch_transcript: StagePrompt,
    pub outline: StagePrompt,
    pub summarize: StagePrompt,
    pub edit: StagePrompt,
}

impl Default for StagePrompts {
    fn default() -> Self {
        Self {
            fetch_transcript: StagePrompt {
                instructions: "Fetch the transcript for the provided YouTube video link: \
                               {{youtube_link}}. Return only the raw transcript text."
                    .to_string(),
                expected_output: "The complete transcript text of the YouTube video.".to_string(),
            },
            outline: StagePrompt {
                instructions: "Using the transcript, create an outline of the video. The \
                               outline must contain clear headings and subheadings that \
                               represent the main topics and sections of the transcript."
                    .to_string(),
                expected_output: "An organized outline with relevant headings and subheadings."
                    .to_string(),
            },
            summarize: StagePrompt {
                instructions: "Using the transcript, write a structured summary of the YouTube \
                               video. Include headings and subheadings as appropriate, and keep \
                               it concise while preserving key details. Make sure to markdown \
                               the output."
                    .to_string(),
                expected_output: "A clear, structured summary of the transcript.".to_string(),
            },
            edit: StagePrompt {
                instructions: "Proofread and fact-check the structured summary against the \
                               transcript. Ensure grammar, spelling, and readability are \
                               excellent. Verify that all important points in the transcript \
                               are covered accurately. Your final answer MUST be the polished, \
                               fact-checked summary."
                    .to_string(),
                expected_output: "A polished and fact-checked final summary.".to_string(),
            },
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with optional custom directory overrides.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let personas_path = custom_path.join("personas.toml");
            if personas_path.exists() {
                let content = std::fs::read_to_string(&personas_path)?;
                prompts.personas = toml::from_str(&content)?;
            }

            let stages_path = custom_path.join("stages.toml");
            if stages_path.exists() {
                let content = std::fs::read_to_string(&stages_path)?;
                prompts.stages = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
