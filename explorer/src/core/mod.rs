//! Core domain model types.
//!
//! This module contains the values that flow through a pipeline run:
//! - The raw response body handed from fetch to decode
//! - The decoded profile record
//! - Stage names

mod record;
mod stage;

pub use record::{ProfileRecord, RawBody};
pub use stage::PipelineStage;
