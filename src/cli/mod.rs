//! CLI module for Oppsum.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Oppsum - YouTube video summarization
///
/// Fetches a video transcript and produces a fact-checked markdown summary
/// through a sequential pipeline of LLM agents.
/// The name "Oppsum" comes from the Norwegian "oppsummere," to sum up.
#[derive(Parser, Debug)]
#[command(name = "oppsum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a YouTube video and write the result to a markdown file
    Summarize {
        /// YouTube video URL (read from stdin when omitted)
        link: Option<String>,

        /// Output file (default: youtube_summary.md)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}
