//! Configuration module for Oppsum.

mod prompts;
mod settings;

pub use prompts::{PersonaPrompt, Personas, Prompts, StagePrompt, StagePrompts};
pub use settings::{GeneralSettings, LlmSettings, OutputSettings, ServerSettings, Settings};
