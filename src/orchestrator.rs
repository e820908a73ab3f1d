//! Pipeline orchestrator for Oppsum.
//!
//! Builds the agent roster, the stage list, and the tool context once, then
//! serves `summarize()` calls from both the CLI and the HTTP facade.

use crate::agent::{OpenAiStageRunner, Roster, StageRunner, ToolContext};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::pipeline::{build_stages, Pipeline};
use crate::transcript::{extract_video_id, TranscriptSource, YoutubeTranscriptSource};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator: one immutable pipeline shared across runs.
pub struct Orchestrator {
    pipeline: Pipeline,
    runner: Arc<dyn StageRunner>,
}

impl Orchestrator {
    /// Create an orchestrator with the default OpenAI-backed runner and
    /// YouTube transcript source.
    pub fn new(settings: Settings) -> Result<Self> {
        let source: Arc<dyn TranscriptSource> = Arc::new(YoutubeTranscriptSource::new());
        let runner = Arc::new(OpenAiStageRunner::new(
            &settings.llm.model,
            settings.llm.temperature,
            ToolContext::new(source),
            settings.llm.max_tool_iterations,
        ));

        Self::with_runner(settings, runner)
    }

    /// Create an orchestrator with a custom stage runner.
    pub fn with_runner(settings: Settings, runner: Arc<dyn StageRunner>) -> Result<Self> {
        let prompts = Prompts::load(settings.general.prompts_dir.as_deref())?;

        let roster = Roster::from_personas(&prompts.personas);
        let stages = build_stages(&prompts.stages);

        Ok(Self {
            pipeline: Pipeline::new(roster, stages),
            runner,
        })
    }

    /// Run the full pipeline for one video link and return the final summary.
    ///
    /// The link is validated up front so an unparseable URL fails before any
    /// network call; errors from later stages propagate unchanged.
    #[instrument(skip(self), fields(link = %youtube_link))]
    pub async fn summarize(&self, youtube_link: &str) -> Result<String> {
        let video_id = extract_video_id(youtube_link)?;
        info!("Summarizing video {}", video_id);

        let summary = self.pipeline.run(self.runner.as_ref(), youtube_link).await?;

        info!("Pipeline complete ({} chars)", summary.len());
        Ok(summary)
    }
}
