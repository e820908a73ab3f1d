//! CLI command implementations.

mod serve;
mod summarize;

pub use serve::run_serve;
pub use summarize::run_summarize;
