pub mod runner;
pub mod transcript_source;
