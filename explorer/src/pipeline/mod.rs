//! Pipeline building and execution.
//!
//! This module provides:
//! - The profile pipeline (fetch → decode → annotate → persist)
//! - A builder that assembles it from configuration

mod builder;
mod runner;

pub use builder::ProfilePipelineBuilder;
pub use runner::ProfilePipeline;
