//! # Explorer
//!
//! Fetches a user's public profile from a remote API, decodes it, annotates
//! it and persists it.
//!
//! Every step returns a `Result` with the same error type, and the pipeline
//! chains them so the first failure ends the run:
//!
//! - **Fetch**: one HTTP GET to `<base_url>/users/<identifier>`
//! - **Decode**: JSON body to [`ProfileRecord`](core::ProfileRecord)
//! - **Annotate**: star marker above a repository threshold
//! - **Persist**: hand the record to a [`RecordStore`](stores::RecordStore)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use explorer::prelude::*;
//!
//! let pipeline = ProfilePipeline::builder(ExplorerConfig::default())
//!     .store(Arc::new(JsonLinesRecordStore::new("profiles.jsonl")))
//!     .build()?;
//!
//! match pipeline.run("octocat").await {
//!     Ok(record) => println!("{record}"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod stores;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AnnotatorConfig, DecoderConfig, ExplorerConfig, FetchConfig};
    pub use crate::core::{PipelineStage, ProfileRecord, RawBody};
    pub use crate::errors::{ConfigError, ErrorKind, PipelineError};
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, PipelineEvent,
    };
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::pipeline::{ProfilePipeline, ProfilePipelineBuilder};
    pub use crate::stages::{
        annotate, decode, Annotator, Decoder, HttpProfileSource, Persister, ProfileSource,
    };
    pub use crate::stores::{
        FlagRecordStore, JsonLinesRecordStore, MemoryRecordStore, RecordStore, SaveOutcome,
    };
}
