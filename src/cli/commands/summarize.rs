//! Standalone summarize command.
//!
//! Takes a link from the argument or one line of stdin, runs the pipeline,
//! and writes the final summary to a markdown file (overwriting it).

use crate::cli::Output;
use crate::config::Settings;
use crate::openai::is_api_key_configured;
use crate::orchestrator::Orchestrator;
use std::io::BufRead;
use std::path::PathBuf;

/// Run the summarize command.
pub async fn run_summarize(
    link: Option<&str>,
    output: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    if !is_api_key_configured() {
        anyhow::bail!("OPENAI_API_KEY is not set (environment or .env)");
    }

    let link = match link {
        Some(l) => l.to_string(),
        None => read_link_from_stdin()?,
    };

    let output_path = output
        .map(|o| Settings::expand_path(&o))
        .unwrap_or_else(|| settings.output_file());

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Running summarization pipeline...");
    let result = orchestrator.summarize(&link).await;
    spinner.finish_and_clear();

    let summary = result?;
    write_summary(&output_path, &summary)?;

    Output::success(&format!("Summary written to {}", output_path.display()));
    Ok(())
}

fn read_link_from_stdin() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let link = line.trim().to_string();
    if link.is_empty() {
        anyhow::bail!("No YouTube link provided");
    }
    Ok(link)
}

fn write_summary(path: &PathBuf, summary: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, summary)?;
    Ok(())
}
