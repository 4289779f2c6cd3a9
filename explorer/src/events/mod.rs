//! Run events for observability.
//!
//! A pipeline reports its progress as [`PipelineEvent`]s to an
//! [`EventSink`]. The sink is passed to the pipeline when it is built;
//! there is no process-wide sink.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::PipelineStage;
use crate::errors::ErrorKind;

/// Something that happened during a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A run began.
    RunStarted {
        /// Run ID.
        run_id: Uuid,
        /// Requested identifier.
        identifier: String,
        /// Event time.
        at: DateTime<Utc>,
    },
    /// A stage finished successfully.
    StageCompleted {
        /// Run ID.
        run_id: Uuid,
        /// The stage.
        stage: PipelineStage,
        /// Stage duration in milliseconds.
        duration_ms: f64,
        /// Event time.
        at: DateTime<Utc>,
    },
    /// A stage failed; no later stage runs.
    StageFailed {
        /// Run ID.
        run_id: Uuid,
        /// The stage.
        stage: PipelineStage,
        /// Error kind.
        kind: ErrorKind,
        /// Error message.
        message: String,
        /// Stage duration in milliseconds.
        duration_ms: f64,
        /// Event time.
        at: DateTime<Utc>,
    },
    /// The run produced a persisted record.
    RunCompleted {
        /// Run ID.
        run_id: Uuid,
        /// Final username.
        username: String,
        /// Run duration in milliseconds.
        duration_ms: f64,
        /// Event time.
        at: DateTime<Utc>,
    },
    /// The run stopped on an error.
    RunFailed {
        /// Run ID.
        run_id: Uuid,
        /// Error kind.
        kind: ErrorKind,
        /// Run duration in milliseconds.
        duration_ms: f64,
        /// Event time.
        at: DateTime<Utc>,
    },
}

impl PipelineEvent {
    /// Returns the event type name (e.g., "stage_completed").
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::StageCompleted { .. } => "stage_completed",
            Self::StageFailed { .. } => "stage_failed",
            Self::RunCompleted { .. } => "run_completed",
            Self::RunFailed { .. } => "run_failed",
        }
    }

    /// Returns the run this event belongs to.
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::StageCompleted { run_id, .. }
            | Self::StageFailed { run_id, .. }
            | Self::RunCompleted { run_id, .. }
            | Self::RunFailed { run_id, .. } => *run_id,
        }
    }

    /// Returns the stage for stage events.
    #[must_use]
    pub const fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::StageCompleted { stage, .. } | Self::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
