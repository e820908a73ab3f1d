//! Oppsum - YouTube video summarization through an agent pipeline.
//!
//! The name "Oppsum" comes from the Norwegian "oppsummere," to sum up.
//!
//! # Overview
//!
//! Oppsum fetches the transcript of a YouTube video and turns it into a
//! fact-checked, structured markdown summary. The work is split across three
//! LLM personas run strictly in sequence:
//!
//! 1. The **Summarizer** fetches the raw transcript (via a bound tool)
//! 2. The **Planner** builds a headed outline of the content
//! 3. The **Summarizer** writes a structured markdown summary
//! 4. The **Editor** proofreads and fact-checks the summary against the
//!    transcript
//!
//! The result is exposed both as a CLI command (writing `youtube_summary.md`)
//! and as a small HTTP API.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `transcript` - Video id parsing and transcript retrieval
//! - `agent` - Personas, tool bindings, and the LLM stage runner
//! - `pipeline` - The fixed ordered stage list and its run loop
//! - `orchestrator` - Wires everything together behind one `summarize()`
//!
//! # Example
//!
//! ```rust,no_run
//! use oppsum::config::Settings;
//! use oppsum::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let summary = orchestrator
//!         .summarize("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     println!("{}", summary);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod pipeline;
pub mod transcript;

pub use error::{OppsumError, Result};
