//! CLI library components for the CSV consolidator.

pub mod logging;
pub mod pipeline;
pub mod prompt;
